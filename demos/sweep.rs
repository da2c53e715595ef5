/* demos/sweep.rs */

use std::sync::Arc;
use std::time::Duration as StdDuration;
use storefront_core::*;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("storefront_core=info"))
        .init();

    println!("Starting expired-record sweep demo...\n");

    const SWEEP_INTERVAL: u64 = 2; // seconds

    let clock = ManualClock::new(current_timestamp());
    let store = Arc::new(RateLimiterStore::with_clock(clock.clone()));
    let phone_rule = *LimiterConfig::checkout().rule_for(CHECKOUT_PHONE);

    println!("--- Phase 1: Filling the table ---");
    let num_phones = 500;
    for i in 0..num_phones {
        let key = rate_key("acme", CHECKOUT_PHONE, &format!("8801711{:06}", i));
        store.is_rate_limited(&key, &phone_rule);
    }
    println!("  Tracked keys: {}", store.len());
    assert_eq!(store.len(), num_phones);

    println!("\n--- Phase 2: Records outlive their window without a sweeper ---");
    clock.advance(Duration::minutes(61));
    println!("  Clock advanced past the 60 minute window.");
    println!("  Tracked keys: {}", store.len());
    assert_eq!(store.len(), num_phones);

    println!("\n--- Phase 3: Sweeper evicts lapsed records ---");
    let handle = Sweeper::new(store.clone(), SWEEP_INTERVAL).spawn();
    sleep(StdDuration::from_secs(SWEEP_INTERVAL + 1)).await;
    println!("  Tracked keys: {}", store.len());
    assert!(store.is_empty());

    handle.abort();
    println!("\nSweep demo completed successfully.");
}
