/* src/error.rs */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// Too many attempts in the current window for `purpose`.
    #[error("Rate limit exceeded for {purpose}")]
    RateLimited { purpose: String },

    #[error("Too many pending orders: {pending} (max {max})")]
    TooManyPendingOrders { pending: u64, max: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failure reported by the order store.
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// HTTP status the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidPhone(_) => 400,
            Error::RateLimited { .. } | Error::TooManyPendingOrders { .. } => 429,
            Error::Config(_) | Error::Store(_) => 500,
        }
    }

    pub fn is_throttled(&self) -> bool {
        self.status_code() == 429
    }
}
