//! # Suppliers Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Pick the exchange-rate source and the CSV mirror
//! - Create the supplier service and export the mirror once
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use suppliers_hex::outbound::{DolarApiClient, FixedRateProvider};
use suppliers_hex::{SupplierService, inbound::HttpServer};
use suppliers_repo::{CsvMirror, build_repo};
use suppliers_types::ExchangeRateProvider;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("suppliers-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when enabled
    let (telemetry, otel_provider) = if config.otel_enabled {
        let (otel_tracer, otel_provider) = init_tracer()?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(otel_tracer)),
            Some(otel_provider),
        )
    } else {
        (None, None)
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,suppliers_app=debug,suppliers_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting suppliers server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    tracing::info!(backend = repo.backend(), "Repository ready");

    let rates: Arc<dyn ExchangeRateProvider> = match config.fixed_rate {
        Some(rate) => {
            tracing::warn!(%rate, "Using a fixed exchange rate");
            Arc::new(FixedRateProvider::new(rate))
        }
        None => {
            tracing::info!(url = %config.exchange_rate_url, "Using HTTP exchange-rate source");
            Arc::new(DolarApiClient::new(
                config.exchange_rate_url.clone(),
                config.exchange_rate_timeout,
            )?)
        }
    };

    let mirror = Arc::new(CsvMirror::new(&config.mirror_path));
    tracing::info!(path = %config.mirror_path.display(), "Mirror file");

    // Create the supplier service
    let service =
        SupplierService::new(repo, rates, mirror).with_max_per_page(config.max_per_page);

    // Bring the mirror in line with the store before serving
    match service.export_mirror().await {
        Ok(rows) => tracing::info!(rows, "Initial mirror export done"),
        Err(e) => tracing::error!(error = %e, "Initial mirror export failed"),
    }

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
