//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use exchange_rates::DEFAULT_OFFICIAL_RATE_URL;
use suppliers_types::SellRate;
use suppliers_types::domain::page::DEFAULT_MAX_PER_PAGE;

const DEFAULT_DATABASE_URL: &str = "sqlite://proveedores.db?mode=rwc";
const DEFAULT_MIRROR_PATH: &str = "proveedores_actualizados.csv";

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub mirror_path: PathBuf,
    pub exchange_rate_url: String,
    pub exchange_rate_timeout: Duration,
    /// When set, the HTTP rate source is replaced by this constant.
    pub fixed_rate: Option<SellRate>,
    pub max_per_page: u32,
    pub otel_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT: {}", e))?;

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mirror_path = var("MIRROR_PATH")
            .unwrap_or_else(|| DEFAULT_MIRROR_PATH.to_string())
            .into();

        let exchange_rate_url =
            var("EXCHANGE_RATE_URL").unwrap_or_else(|| DEFAULT_OFFICIAL_RATE_URL.to_string());

        let timeout_secs: u64 = var("EXCHANGE_RATE_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid EXCHANGE_RATE_TIMEOUT_SECS: {}", e))?;

        let fixed_rate = match var("EXCHANGE_RATE_FIXED") {
            Some(raw) if !raw.trim().is_empty() => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid EXCHANGE_RATE_FIXED: {}", e))?;
                Some(SellRate::new(value)?)
            }
            _ => None,
        };

        let max_per_page = match var("MAX_PER_PAGE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid MAX_PER_PAGE: {}", e))?,
            None => DEFAULT_MAX_PER_PAGE,
        };
        if max_per_page == 0 {
            anyhow::bail!("MAX_PER_PAGE must be at least 1");
        }

        let otel_enabled = var("OTEL_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            mirror_path,
            exchange_rate_url,
            exchange_rate_timeout: Duration::from_secs(timeout_secs),
            fixed_rate,
            max_per_page,
            otel_enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite://proveedores.db?mode=rwc");
        assert_eq!(config.mirror_path, PathBuf::from("proveedores_actualizados.csv"));
        assert_eq!(config.exchange_rate_url, DEFAULT_OFFICIAL_RATE_URL);
        assert_eq!(config.exchange_rate_timeout, Duration::from_secs(10));
        assert!(config.fixed_rate.is_none());
        assert_eq!(config.max_per_page, 100);
        assert!(!config.otel_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/proveedores"),
            ("MIRROR_PATH", "/tmp/out.csv"),
            ("EXCHANGE_RATE_TIMEOUT_SECS", "3"),
            ("EXCHANGE_RATE_FIXED", "1085.5"),
            ("MAX_PER_PAGE", "25"),
            ("OTEL_ENABLED", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "postgres://localhost/proveedores");
        assert_eq!(config.exchange_rate_timeout, Duration::from_secs(3));
        assert_eq!(config.fixed_rate.unwrap().value(), 1085.5);
        assert_eq!(config.max_per_page, 25);
        assert!(config.otel_enabled);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("EXCHANGE_RATE_FIXED", "0")]).is_err());
        assert!(load(&[("MAX_PER_PAGE", "0")]).is_err());
    }

    #[test]
    fn test_blank_fixed_rate_is_unset() {
        let config = load(&[("EXCHANGE_RATE_FIXED", "  ")]).unwrap();
        assert!(config.fixed_rate.is_none());
    }
}
