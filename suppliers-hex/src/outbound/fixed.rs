//! Constant exchange rate, for offline development.

use async_trait::async_trait;

use suppliers_types::{ExchangeError, ExchangeRateProvider, SellRate};

/// Always answers with the same rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateProvider {
    rate: SellRate,
}

impl FixedRateProvider {
    pub fn new(rate: SellRate) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRateProvider {
    async fn official_sell_rate(&self) -> Result<SellRate, ExchangeError> {
        Ok(self.rate)
    }
}
