/* src/checkout.rs */

//! Admission control for checkout submissions.

use crate::clock::{Clock, SystemClock};
use crate::config::{CHECKOUT_IP, CHECKOUT_PHONE, LimiterConfig};
use crate::error::{Error, Result};
use crate::limiter::RateLimiterStore;
use crate::phone::PhoneNumber;
use std::sync::Arc;

/// Builds the limiter key for one brand, purpose and subject.
pub fn rate_key(brand: &str, purpose: &str, subject: &str) -> String {
    format!("{}_{}_{}", brand, purpose, subject)
}

/// Read access to orders that are placed but not yet confirmed.
#[trait_variant::make(PendingOrders: Send)]
pub trait LocalPendingOrders {
    async fn count_pending(&self, brand: &str, phone: &PhoneNumber) -> Result<u64>;
}

/// Checkout throttle for one brand: a short per-IP window, a long
/// per-phone window, then a cap on orders still pending for the phone.
pub struct CheckoutGuard<P, C = SystemClock>
where
    P: PendingOrders,
    C: Clock,
{
    brand: String,
    store: Arc<RateLimiterStore<C>>,
    orders: Arc<P>,
    config: Arc<LimiterConfig>,
}

impl<P, C> CheckoutGuard<P, C>
where
    P: PendingOrders,
    C: Clock,
{
    pub fn new(
        brand: impl Into<String>,
        store: Arc<RateLimiterStore<C>>,
        orders: Arc<P>,
        config: Arc<LimiterConfig>,
    ) -> Self {
        Self {
            brand: brand.into(),
            store,
            orders,
            config,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Decides whether a checkout from `ip` for `raw_phone` may proceed.
    /// Returns the normalized phone on success.
    ///
    /// The IP window is charged first, so malformed submissions still count
    /// against the sender.
    pub async fn admit(&self, ip: &str, raw_phone: &str) -> Result<PhoneNumber> {
        self.charge(CHECKOUT_IP, ip)?;

        let phone = PhoneNumber::parse_with_country(raw_phone, &self.config.country_code)?;
        self.charge(CHECKOUT_PHONE, phone.as_str())?;

        if let Some(max) = self.config.max_pending_orders {
            let pending = self.orders.count_pending(&self.brand, &phone).await?;
            if pending >= max {
                tracing::warn!(
                    brand = %self.brand,
                    phone = %phone,
                    pending,
                    max,
                    "Checkout rejected: too many pending orders"
                );
                return Err(Error::TooManyPendingOrders { pending, max });
            }
        }

        tracing::debug!(brand = %self.brand, ip, phone = %phone, "Checkout admitted");
        Ok(phone)
    }

    fn charge(&self, purpose: &str, subject: &str) -> Result<()> {
        let key = rate_key(&self.brand, purpose, subject);
        let rule = self.config.rule_for(purpose);

        if self.store.is_rate_limited(&key, rule) {
            tracing::warn!(brand = %self.brand, purpose, subject, "Checkout rejected: rate limited");
            return Err(Error::RateLimited {
                purpose: purpose.to_string(),
            });
        }
        Ok(())
    }
}
