/* src/limiter.rs */

use crate::clock::{Clock, SystemClock};
use crate::types::{RateLimitOptions, RateRecord};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Fixed-window attempt counters keyed by an opaque string.
///
/// Each key holds at most one [`RateRecord`]. A record whose window has
/// lapsed is replaced on the next attempt for that key; nothing is removed
/// unless [`RateLimiterStore::sweep_expired`] is called.
///
/// A burst of up to `2 * limit` attempts can pass across a window boundary.
/// Callers wanting smoother throttling compose several windows.
///
/// # Examples
///
/// ```rust
/// use storefront_core::*;
///
/// let clock = ManualClock::new(0);
/// let store = RateLimiterStore::with_clock(clock.clone());
/// let options = RateLimitOptions::new(Duration::minutes(15), 2);
///
/// assert!(!store.is_rate_limited("acme_checkout_ip_1.1.1.1", &options));
/// assert!(!store.is_rate_limited("acme_checkout_ip_1.1.1.1", &options));
/// assert!(store.is_rate_limited("acme_checkout_ip_1.1.1.1", &options));
///
/// clock.advance(Duration::minutes(16));
/// assert!(!store.is_rate_limited("acme_checkout_ip_1.1.1.1", &options));
/// ```
pub struct RateLimiterStore<C: Clock = SystemClock> {
    clock: C,
    records: DashMap<String, RateRecord>,
}

impl RateLimiterStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RateLimiterStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimiterStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            records: DashMap::new(),
        }
    }

    /// Counts an attempt for `key` and returns `true` once the attempt is
    /// past `options.limit` in the current window.
    ///
    /// The first attempt of a window is never limited. The check and the
    /// increment happen under the key's shard lock, so concurrent callers
    /// never lose an update.
    pub fn is_rate_limited(&self, key: &str, options: &RateLimitOptions) -> bool {
        let now = self.clock.now_ms();

        let limited = match self.records.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(RateRecord::open(now, options));
                    false
                } else {
                    occupied.get_mut().add_attempt(options.limit)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RateRecord::open(now, options));
                false
            }
        };

        if limited {
            tracing::debug!(key, limit = options.limit, "Rate limit exceeded");
        }

        limited
    }

    /// Snapshot of the record currently stored for `key`, expired or not.
    pub fn record(&self, key: &str) -> Option<RateRecord> {
        self.records.get(key).map(|r| *r.value())
    }

    /// Removes every record whose window has lapsed. Returns how many were
    /// removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;
        self.records.retain(|_, record| {
            let expired = record.is_expired(now);
            if expired {
                removed += 1;
            }
            !expired
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::Duration;
    use std::sync::Arc;

    fn store_at(start: u64) -> (ManualClock, RateLimiterStore<ManualClock>) {
        let clock = ManualClock::new(start);
        (clock.clone(), RateLimiterStore::with_clock(clock))
    }

    #[test]
    fn test_admits_limit_then_rejects() {
        let (_clock, store) = store_at(1_000);
        let options = RateLimitOptions::new(Duration::minutes(15), 5);
        let key = "acme_checkout_ip_1.1.1.1";

        for i in 1..=5 {
            assert!(
                !store.is_rate_limited(key, &options),
                "Attempt {} should be admitted",
                i
            );
        }
        assert!(store.is_rate_limited(key, &options), "Attempt 6 should be limited");
        assert!(store.is_rate_limited(key, &options), "Attempt 7 should be limited");
        assert_eq!(store.record(key).map(|r| r.count), Some(7));
    }

    #[test]
    fn test_window_reset_after_expiry() {
        let (clock, store) = store_at(0);
        let options = RateLimitOptions::new(Duration::seconds(1), 1);
        let key = "acme_checkout_phone_8801711000000";

        assert!(!store.is_rate_limited(key, &options));
        assert!(store.is_rate_limited(key, &options));

        // Still inside the window at exactly expires_at.
        clock.set(1_000);
        assert!(store.is_rate_limited(key, &options));

        clock.set(1_001);
        assert!(!store.is_rate_limited(key, &options));
        assert_eq!(
            store.record(key),
            Some(RateRecord {
                count: 1,
                expires_at: 2_001
            })
        );
    }

    #[test]
    fn test_key_isolation() {
        let (_clock, store) = store_at(0);
        let options = RateLimitOptions::new(Duration::seconds(10), 1);

        assert!(!store.is_rate_limited("a", &options));
        assert!(store.is_rate_limited("a", &options));
        let a_before = store.record("a");

        assert!(!store.is_rate_limited("b", &options));
        assert!(store.is_rate_limited("b", &options));

        assert_eq!(store.record("a"), a_before);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_expired_records_linger_until_swept() {
        let (clock, store) = store_at(0);
        let short = RateLimitOptions::new(Duration::seconds(1), 3);
        let long = RateLimitOptions::new(Duration::minutes(1), 3);

        store.is_rate_limited("short", &short);
        store.is_rate_limited("long", &long);

        clock.advance(Duration::seconds(5));
        assert_eq!(store.len(), 2);

        assert_eq!(store.sweep_expired(), 1);
        assert!(store.record("short").is_none());
        assert!(store.record("long").is_some());
    }

    #[test]
    fn test_sweep_reports_removed_count() {
        let (clock, store) = store_at(0);
        let short = RateLimitOptions::new(Duration::seconds(1), 3);
        let long = RateLimitOptions::new(Duration::minutes(1), 3);

        for i in 0..4 {
            store.is_rate_limited(&format!("short_{}", i), &short);
        }
        for i in 0..3 {
            store.is_rate_limited(&format!("long_{}", i), &long);
        }

        assert_eq!(store.sweep_expired(), 0);

        clock.advance(Duration::seconds(2));
        // Attempt on a lapsed key reopens it, so it survives the sweep.
        store.is_rate_limited("short_0", &short);

        assert_eq!(store.sweep_expired(), 3);
        assert_eq!(store.len(), 4);
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn test_concurrent_attempts_are_all_counted() {
        let (_clock, store) = store_at(0);
        let store = Arc::new(store);
        let options = RateLimitOptions::new(Duration::hours(1), 1_000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.is_rate_limited("shared", &options);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.record("shared").map(|r| r.count), Some(400));
    }
}
