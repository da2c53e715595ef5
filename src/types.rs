/* src/types.rs */

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    Milliseconds(u64),
    Seconds(u64),
    Minutes(u64),
    Hours(u64),
    Days(u64),
}

impl Duration {
    pub fn milliseconds(n: u64) -> Self {
        Duration::Milliseconds(n)
    }
    pub fn seconds(n: u64) -> Self {
        Duration::Seconds(n)
    }
    pub fn minutes(n: u64) -> Self {
        Duration::Minutes(n)
    }
    pub fn hours(n: u64) -> Self {
        Duration::Hours(n)
    }
    pub fn days(n: u64) -> Self {
        Duration::Days(n)
    }

    pub fn as_millis(&self) -> u64 {
        match self {
            Duration::Milliseconds(n) => *n,
            Duration::Seconds(n) => n.saturating_mul(1_000),
            Duration::Minutes(n) => n.saturating_mul(60_000),
            Duration::Hours(n) => n.saturating_mul(3_600_000),
            Duration::Days(n) => n.saturating_mul(86_400_000),
        }
    }
}

/// Limit and window for one throttled purpose.
///
/// `limit >= 1` and a non-zero `window` are preconditions; other values
/// fall through to whatever the window arithmetic produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitOptions {
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitOptions {
    pub fn new(window: Duration, limit: u32) -> Self {
        Self { limit, window }
    }

    pub fn window_ms(&self) -> u64 {
        self.window.as_millis()
    }
}

/// Current window of one throttled key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    /// Window end, in milliseconds since the Unix epoch.
    pub expires_at: u64,
}

impl RateRecord {
    pub fn open(now: u64, options: &RateLimitOptions) -> Self {
        Self {
            count: 1,
            expires_at: now.saturating_add(options.window_ms()),
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// Counts one more attempt and reports whether it went over `limit`.
    pub fn add_attempt(&mut self, limit: u32) -> bool {
        self.count = self.count.saturating_add(1);
        self.count > limit
    }
}
