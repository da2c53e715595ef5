/* src/lib.rs */

//! Shared building blocks for the brand storefronts.
//!
//! - [`RateLimiterStore`]: fixed-window attempt counters, injected into
//!   request handlers and driven by a [`Clock`].
//! - [`CheckoutGuard`]: the per-IP, per-phone and pending-order checks run
//!   before an order is accepted.
//! - [`flatten_products`]: expands color variants into standalone
//!   [`VirtualProduct`] views for listings and related-product rails.
//! - [`parse_description`]: splits product text into specifications and
//!   prose.
//! - [`OrderMessage`] / [`whatsapp_link`]: order hand-off over WhatsApp.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_core::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Arc::new(LimiterConfig::checkout().with_sweep_interval(300));
//!     let store = Arc::new(RateLimiterStore::new());
//!     if let Some(sweeper) = Sweeper::from_config(store.clone(), &config) {
//!         sweeper.spawn();
//!     }
//!
//!     let guard = CheckoutGuard::new("acme", store, Arc::new(orders), config);
//!     match guard.admit("203.0.113.7", "+880 1711 000000").await {
//!         Ok(phone) => println!("placing order for {}", phone),
//!         Err(e) => println!("{} -> HTTP {}", e, e.status_code()),
//!     }
//! }
//! ```

mod checkout;
mod clock;
mod config;
mod description;
mod error;
mod flatten;
mod gc;
mod limiter;
mod phone;
mod product;
mod types;
mod whatsapp;

pub use checkout::{CheckoutGuard, LocalPendingOrders, PendingOrders, rate_key};
pub use clock::{Clock, ManualClock, SystemClock, current_timestamp};
pub use config::*;
pub use description::*;
pub use error::{Error, Result};
pub use flatten::*;
pub use gc::Sweeper;
pub use limiter::RateLimiterStore;
pub use phone::PhoneNumber;
pub use product::*;
pub use types::*;
pub use whatsapp::{OrderLine, OrderMessage, whatsapp_link};
