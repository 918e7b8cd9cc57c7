//! Outbound Adapters
//!
//! Implementations of the exchange-rate port.

mod dolar_api;
mod fixed;

pub use dolar_api::DolarApiClient;
pub use fixed::FixedRateProvider;
