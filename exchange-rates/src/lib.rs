//! Official Sell-Rate Quotes
//!
//! Value types for the exchange rate used to convert a supplier's debt from the
//! local currency into the reference foreign currency.
//!
//! A [`SellRate`] can only hold a finite, strictly positive number, so a
//! conversion through it can never divide by zero or produce NaN.
//!
//! # Example
//! ```
//! use exchange_rates::{SellRate, parse_sell_rate};
//!
//! let rate = parse_sell_rate(br#"{"casa": "oficial", "venta": 1000.0}"#).unwrap();
//! assert_eq!(rate.value(), 1000.0);
//! assert_eq!(rate.to_foreign(2500.0), 2.5);
//!
//! assert!(SellRate::new(0.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default public source for the official sell rate.
pub const DEFAULT_OFFICIAL_RATE_URL: &str = "https://dolarapi.com/v1/dolares/oficial";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Reasons a quote cannot be turned into a usable rate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("Rate must be a finite positive number, got {0}")]
    NotPositive(f64),

    #[error("Malformed quote: {0}")]
    Malformed(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Sell Rate
// ─────────────────────────────────────────────────────────────────────────────

/// Units of local currency per one unit of the foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct SellRate(f64);

impl SellRate {
    pub fn new(value: f64) -> Result<Self, RateError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(RateError::NotPositive(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Converts a local-currency amount into the foreign currency.
    pub fn to_foreign(&self, local: f64) -> f64 {
        local / self.0
    }
}

impl fmt::Display for SellRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SellRate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        SellRate::new(value).map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quote wire format
// ─────────────────────────────────────────────────────────────────────────────

/// A quote as published by the rate source.
///
/// Only `venta` (the sell side) is required. The other fields are optional
/// and are only logged alongside the fetched rate.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficialQuote {
    #[serde(default)]
    pub casa: Option<String>,
    #[serde(default)]
    pub compra: Option<f64>,
    pub venta: f64,
    #[serde(default, rename = "fechaActualizacion")]
    pub fecha_actualizacion: Option<String>,
}

impl OfficialQuote {
    pub fn sell_rate(&self) -> Result<SellRate, RateError> {
        SellRate::new(self.venta)
    }
}

/// Parses a quote response body.
///
/// Any deviation from the expected shape (not JSON, no `venta`, a non-numeric
/// `venta`) is a [`RateError::Malformed`].
pub fn parse_official_quote(body: &[u8]) -> Result<OfficialQuote, RateError> {
    serde_json::from_slice(body).map_err(|e| RateError::Malformed(e.to_string()))
}

/// Parses a quote response body and extracts the sell rate.
pub fn parse_sell_rate(body: &[u8]) -> Result<SellRate, RateError> {
    parse_official_quote(body)?.sell_rate()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_rate_rejects_non_positive() {
        assert_eq!(SellRate::new(0.0), Err(RateError::NotPositive(0.0)));
        assert!(SellRate::new(-1.5).is_err());
        assert!(SellRate::new(f64::NAN).is_err());
        assert!(SellRate::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_foreign() {
        let rate = SellRate::new(1000.0).unwrap();
        assert!((rate.to_foreign(1000.0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(rate.to_foreign(0.0), 0.0);
    }

    #[test]
    fn test_parse_full_quote() {
        let body = br#"{
            "moneda": "USD",
            "casa": "oficial",
            "nombre": "Oficial",
            "compra": 1045.5,
            "venta": 1085.5,
            "fechaActualizacion": "2024-10-01T15:00:00.000Z"
        }"#;

        let quote = parse_official_quote(body).unwrap();
        assert_eq!(quote.casa.as_deref(), Some("oficial"));
        assert_eq!(quote.compra, Some(1045.5));
        assert_eq!(
            quote.fecha_actualizacion.as_deref(),
            Some("2024-10-01T15:00:00.000Z")
        );
        assert_eq!(quote.sell_rate().unwrap().value(), 1085.5);
    }

    #[test]
    fn test_parse_bare_quote() {
        let quote = parse_official_quote(br#"{"venta": 1000.0}"#).unwrap();
        assert!(quote.casa.is_none());
        assert!(quote.compra.is_none());
        assert!(quote.fecha_actualizacion.is_none());
    }

    #[test]
    fn test_parse_integer_venta() {
        let rate = parse_sell_rate(br#"{"venta": 950}"#).unwrap();
        assert_eq!(rate.value(), 950.0);
    }

    #[test]
    fn test_parse_missing_venta() {
        let result = parse_sell_rate(br#"{"compra": 1000.0}"#);
        assert!(matches!(result, Err(RateError::Malformed(_))));
    }

    #[test]
    fn test_parse_non_numeric_venta() {
        let result = parse_sell_rate(br#"{"venta": "1000"}"#);
        assert!(matches!(result, Err(RateError::Malformed(_))));
    }

    #[test]
    fn test_parse_not_json() {
        let result = parse_sell_rate(b"<html>bad gateway</html>");
        assert!(matches!(result, Err(RateError::Malformed(_))));
    }

    #[test]
    fn test_parse_zero_venta() {
        let result = parse_sell_rate(br#"{"venta": 0}"#);
        assert_eq!(result, Err(RateError::NotPositive(0.0)));
    }

    #[test]
    fn test_deserialize_sell_rate_validates() {
        let ok: SellRate = serde_json::from_str("12.5").unwrap();
        assert_eq!(ok.value(), 12.5);
        assert!(serde_json::from_str::<SellRate>("-3").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SellRate::new(1085.5).unwrap().to_string(), "1085.5");
    }
}
