use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Configuration for tracing initialization.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: String,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl ObsConfig {
    /// Reads `RUST_LOG` and `OTLP_ENDPOINT`.
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            env_filter: std::env::var("RUST_LOG").ok(),
            otlp_endpoint: std::env::var("OTLP_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty()),
        }
    }

    fn filter(&self) -> Result<EnvFilter> {
        let directives = self.env_filter.as_deref().unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
    }
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "employee-server".into(),
            env_filter: None,
            otlp_endpoint: None,
        }
    }
}

/// Flushes and shuts down the span exporter when dropped.
#[must_use = "dropping the guard stops span export"]
pub struct ObsGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for ObsGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to flush span exporter");
            }
        }
    }
}

/// Install the fmt subscriber, plus an OTLP span exporter when an endpoint is
/// configured. Calling this more than once is a no-op.
pub fn init_tracing(config: ObsConfig) -> Result<ObsGuard> {
    if INIT.get().is_some() {
        return Ok(ObsGuard { provider: None });
    }

    let registry = tracing_subscriber::registry()
        .with(config.filter()?)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    let provider = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let provider = otlp_provider(&config.service_name, endpoint)?;
            let tracer = provider.tracer(config.service_name.clone());
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
            Some(provider)
        }
        None => {
            registry.try_init()?;
            None
        }
    };

    let _ = INIT.set(());
    tracing::debug!(service = %config.service_name, otlp = provider.is_some(), "tracing initialized");
    Ok(ObsGuard { provider })
}

fn otlp_provider(service_name: &str, endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()
        .with_context(|| format!("failed to build OTLP exporter for {endpoint}"))?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}
