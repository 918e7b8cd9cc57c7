//! Exchange rate provider port.
//!
//! This trait defines the interface for the official sell-rate source.
//! Implementations can be HTTP clients, fixed-rate providers, etc.

use exchange_rates::{RateError, SellRate};

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate source answered with HTTP {0}")]
    BadStatus(u16),

    #[error(transparent)]
    InvalidQuote(#[from] RateError),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetches the current official sell rate: local currency units per one
    /// unit of the foreign currency.
    ///
    /// Called once per debt write; implementations must not cache.
    async fn official_sell_rate(&self) -> Result<SellRate, ExchangeError>;
}
