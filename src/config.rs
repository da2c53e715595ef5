/* src/config.rs */

use crate::error::{Error, Result};
use crate::phone::{DEFAULT_COUNTRY_CODE, is_valid_country_code};
use crate::types::{Duration, RateLimitOptions};
use serde::Deserialize;
use std::collections::HashMap;

pub const CHECKOUT_IP: &str = "checkout_ip";
pub const CHECKOUT_PHONE: &str = "checkout_phone";

/// Configuration for the checkout limiter
#[derive(Debug, Clone, Deserialize)]
pub struct LimiterConfig {
    pub default_rule: RateLimitOptions,
    #[serde(default)]
    pub purpose_rules: HashMap<String, RateLimitOptions>,
    /// Reject checkout once this many orders are pending for a phone.
    #[serde(default)]
    pub max_pending_orders: Option<u64>,
    /// Seconds between expired-record sweeps. `None` keeps every record.
    #[serde(default)]
    pub sweep_interval: Option<u64>,
    /// Country code for phone numbers written in national form.
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

impl LimiterConfig {
    pub fn new(default_rule: RateLimitOptions) -> Self {
        Self {
            default_rule,
            purpose_rules: HashMap::new(),
            max_pending_orders: None,
            sweep_interval: None,
            country_code: default_country_code(),
        }
    }

    /// Policy the storefronts run at checkout: 5 per 15 minutes per IP,
    /// 2 per hour per phone, at most 3 pending orders per phone.
    pub fn checkout() -> Self {
        Self::new(RateLimitOptions::new(Duration::minutes(15), 5))
            .add_purpose_rule(CHECKOUT_IP, RateLimitOptions::new(Duration::minutes(15), 5))
            .add_purpose_rule(CHECKOUT_PHONE, RateLimitOptions::new(Duration::hours(1), 2))
            .with_max_pending_orders(3)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        if !is_valid_country_code(&config.country_code) {
            return Err(Error::Config(format!(
                "Invalid country code: {}",
                config.country_code
            )));
        }
        Ok(config)
    }

    pub fn add_purpose_rule(mut self, purpose: &str, rule: RateLimitOptions) -> Self {
        self.purpose_rules.insert(purpose.to_string(), rule);
        self
    }

    pub fn with_max_pending_orders(mut self, max: u64) -> Self {
        self.max_pending_orders = Some(max);
        self
    }

    pub fn with_sweep_interval(mut self, seconds: u64) -> Self {
        self.sweep_interval = Some(seconds);
        self
    }

    pub fn with_country_code(mut self, code: &str) -> Self {
        self.country_code = code.to_string();
        self
    }

    pub fn rule_for(&self, purpose: &str) -> &RateLimitOptions {
        self.purpose_rules.get(purpose).unwrap_or(&self.default_rule)
    }

    pub fn has_purpose_rule(&self, purpose: &str) -> bool {
        self.purpose_rules.contains_key(purpose)
    }
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self::checkout()
    }
}
