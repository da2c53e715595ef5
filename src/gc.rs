/* src/gc.rs */

use crate::clock::Clock;
use crate::config::LimiterConfig;
use crate::limiter::RateLimiterStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration as TokioDuration, interval};

/// Periodically evicts expired rate records from a shared store.
///
/// The limiter keeps lapsed records around until the same key is seen
/// again. Long-running processes with many distinct phone numbers can run
/// one of these next to the store to bound the table.
pub struct Sweeper<C: Clock + 'static> {
    store: Arc<RateLimiterStore<C>>,
    every: TokioDuration,
}

impl<C: Clock + 'static> Sweeper<C> {
    pub fn new(store: Arc<RateLimiterStore<C>>, interval_secs: u64) -> Self {
        Self {
            store,
            every: TokioDuration::from_secs(interval_secs.max(1)),
        }
    }

    /// Builds a sweeper when `config.sweep_interval` is set.
    pub fn from_config(store: Arc<RateLimiterStore<C>>, config: &LimiterConfig) -> Option<Self> {
        config.sweep_interval.map(|secs| Self::new(store, secs))
    }

    pub async fn start(self) {
        let mut interval_timer = interval(self.every);

        loop {
            interval_timer.tick().await;
            self.sweep();
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.start())
    }

    fn sweep(&self) -> usize {
        let removed = self.store.sweep_expired();
        if removed > 0 {
            tracing::info!(removed, remaining = self.store.len(), "Swept expired rate records");
        } else {
            tracing::debug!(remaining = self.store.len(), "No expired rate records");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{Duration, RateLimitOptions};

    #[test]
    fn test_sweep_removes_only_lapsed_windows() {
        let clock = ManualClock::new(0);
        let store = Arc::new(RateLimiterStore::with_clock(clock.clone()));
        let options = RateLimitOptions::new(Duration::seconds(1), 1);

        store.is_rate_limited("old", &options);
        clock.advance(Duration::seconds(2));
        store.is_rate_limited("new", &options);

        let sweeper = Sweeper::new(store.clone(), 10);
        assert_eq!(sweeper.sweep(), 1);
        assert!(store.record("old").is_none());
        assert!(store.record("new").is_some());
    }

    #[test]
    fn test_from_config_requires_interval() {
        let store = Arc::new(RateLimiterStore::new());
        assert!(Sweeper::from_config(store.clone(), &LimiterConfig::checkout()).is_none());

        let config = LimiterConfig::checkout().with_sweep_interval(30);
        let sweeper = Sweeper::from_config(store, &config).unwrap();
        assert_eq!(sweeper.every, TokioDuration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_sweeper_runs_on_interval() {
        let clock = ManualClock::new(0);
        let store = Arc::new(RateLimiterStore::with_clock(clock.clone()));
        let options = RateLimitOptions::new(Duration::seconds(1), 1);

        for i in 0..20 {
            store.is_rate_limited(&format!("192.168.0.{}", i), &options);
        }
        clock.advance(Duration::seconds(5));

        let handle = Sweeper::new(store.clone(), 2).spawn();
        tokio::time::sleep(TokioDuration::from_secs(3)).await;

        assert!(store.is_empty());
        handle.abort();
    }
}
