//! HTTP exchange-rate adapter.
//!
//! Fetches the official quote with a single GET and reads its `venta` field.
//! No retries and no caching: every call hits the source.

use std::time::Duration;

use async_trait::async_trait;
use exchange_rates::parse_official_quote;

use suppliers_types::{ExchangeError, ExchangeRateProvider, SellRate};

/// reqwest-backed client for a dolarapi-style quote endpoint.
pub struct DolarApiClient {
    url: String,
    http: reqwest::Client,
}

impl DolarApiClient {
    /// Creates a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for DolarApiClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn official_sell_rate(&self) -> Result<SellRate, ExchangeError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::BadStatus(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;
        let quote = parse_official_quote(&body)?;
        let rate = quote.sell_rate()?;

        tracing::debug!(
            rate = %rate,
            casa = ?quote.casa,
            compra = ?quote.compra,
            updated = ?quote.fecha_actualizacion,
            "Fetched official sell rate"
        );
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};

    use super::*;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base: &str) -> DolarApiClient {
        DolarApiClient::new(format!("{}/v1/dolares/oficial", base), Duration::from_secs(2))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_venta() {
        let base = serve(Router::new().route(
            "/v1/dolares/oficial",
            get(|| async {
                Json(serde_json::json!({
                    "moneda": "USD",
                    "casa": "oficial",
                    "compra": 980.0,
                    "venta": 1000.0,
                    "fechaActualizacion": "2024-10-01T15:00:00.000Z"
                }))
            }),
        ))
        .await;

        let rate = client(&base).official_sell_rate().await.unwrap();
        assert_eq!(rate.value(), 1000.0);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = serve(Router::new().route(
            "/v1/dolares/oficial",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let result = client(&base).official_sell_rate().await;
        assert!(matches!(result, Err(ExchangeError::BadStatus(503))));
    }

    #[tokio::test]
    async fn test_missing_venta() {
        let base = serve(Router::new().route(
            "/v1/dolares/oficial",
            get(|| async { Json(serde_json::json!({ "compra": 980.0 })) }),
        ))
        .await;

        let result = client(&base).official_sell_rate().await;
        assert!(matches!(result, Err(ExchangeError::InvalidQuote(_))));
    }

    #[tokio::test]
    async fn test_zero_venta() {
        let base = serve(Router::new().route(
            "/v1/dolares/oficial",
            get(|| async { Json(serde_json::json!({ "venta": 0 })) }),
        ))
        .await;

        let result = client(&base).official_sell_rate().await;
        assert!(matches!(result, Err(ExchangeError::InvalidQuote(_))));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(&format!("http://{}", addr))
            .official_sell_rate()
            .await;
        assert!(matches!(result, Err(ExchangeError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let base = serve(Router::new().route(
            "/v1/dolares/oficial",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({ "venta": 1000.0 }))
            }),
        ))
        .await;

        let slow = DolarApiClient::new(
            format!("{}/v1/dolares/oficial", base),
            Duration::from_millis(200),
        )
        .unwrap();
        let result = slow.official_sell_rate().await;
        assert!(matches!(result, Err(ExchangeError::ServiceUnavailable(_))));
    }
}
