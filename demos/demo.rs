/* demos/demo.rs */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use storefront_core::*;

#[derive(Default)]
struct InMemoryOrders {
    pending: Mutex<HashMap<String, u64>>,
}

impl InMemoryOrders {
    fn place(&self, brand: &str, phone: &PhoneNumber) {
        let mut pending = self.pending.lock().unwrap();
        *pending.entry(rate_key(brand, "pending", phone.as_str())).or_default() += 1;
    }
}

impl PendingOrders for InMemoryOrders {
    async fn count_pending(&self, brand: &str, phone: &PhoneNumber) -> Result<u64> {
        let pending = self.pending.lock().unwrap();
        Ok(pending
            .get(&rate_key(brand, "pending", phone.as_str()))
            .copied()
            .unwrap_or(0))
    }
}

fn describe(result: &Result<PhoneNumber>) -> String {
    match result {
        Ok(phone) => format!("Admitted ({})", phone),
        Err(e) => format!("Rejected: {} [HTTP {}]", e, e.status_code()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Starting storefront checkout demo...\n");

    let clock = ManualClock::new(current_timestamp());
    let store = Arc::new(RateLimiterStore::with_clock(clock.clone()));
    let orders = Arc::new(InMemoryOrders::default());
    let config = Arc::new(LimiterConfig::checkout());
    let guard = CheckoutGuard::new("acme", store.clone(), orders.clone(), config);

    println!("Checkout policy:");
    println!("  - Per IP: 5 requests / 15 minutes");
    println!("  - Per phone: 2 requests / 60 minutes");
    println!("  - At most 3 pending orders per phone");
    println!();

    println!("--- Test 1: Per-phone window ---");
    for i in 1..=3 {
        let ip = format!("10.0.0.{}", i);
        let result = guard.admit(&ip, "+880 1711 000000").await;
        println!("  Checkout #{} from {}: {}", i, ip, describe(&result));
        assert_eq!(result.is_ok(), i <= 2);
        if let Ok(phone) = result {
            orders.place(guard.brand(), &phone);
        }
    }
    println!();

    println!("--- Test 2: Per-IP window ---");
    for i in 1..=6 {
        let phone = format!("0171100010{}", i);
        let result = guard.admit("192.0.2.1", &phone).await;
        println!("  Checkout #{} for {}: {}", i, phone, describe(&result));
        assert_eq!(result.is_ok(), i <= 5);
    }
    println!();

    println!("--- Test 3: Windows reset ---");
    println!("  Advancing the clock by 61 minutes...");
    clock.advance(Duration::minutes(61));
    let result = guard.admit("192.0.2.1", "+880 1711 000000").await;
    println!("  Checkout after reset: {}", describe(&result));
    assert!(result.is_ok());
    println!();

    println!("--- Test 4: Pending orders cap ---");
    if let Ok(phone) = &result {
        orders.place(guard.brand(), phone);
    }
    clock.advance(Duration::minutes(61));
    let result = guard.admit("192.0.2.9", "+880 1711 000000").await;
    println!("  Checkout with 3 pending orders: {}", describe(&result));
    assert!(matches!(result, Err(Error::TooManyPendingOrders { .. })));
    println!();

    println!("--- Test 5: WhatsApp hand-off ---");
    let phone = PhoneNumber::parse("01711000105").unwrap();
    let message = OrderMessage {
        brand_name: "Acme".into(),
        order_id: "1042".into(),
        customer_name: "Rahim".into(),
        phone: phone.to_string(),
        address: "House 4, Road 2, Dhaka".into(),
        currency: "Tk ".into(),
        lines: vec![OrderLine {
            name: "Panjabi".into(),
            color: Some("Navy Blue".into()),
            size: Some("L".into()),
            quantity: 1,
            unit_price: 1450.0,
        }],
        shipping: 60.0,
    };
    let shop = PhoneNumber::parse("+8801900000000").unwrap();
    println!("{}\n", message.render());
    println!("  Link: {}", whatsapp_link(&shop, &message.render()));
    println!();

    println!("Tracked keys: {}", store.len());
    println!("All demo checks completed.");
}
