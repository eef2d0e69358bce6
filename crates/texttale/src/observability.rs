//! Logging and optional span export for the TextTale binary.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How the process reports logs and spans.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans
    pub service_name: String,
    /// Fallback filter when `RUST_LOG` is unset (e.g. "info", "texttale_narrative=debug")
    pub log_level: String,
    /// Emit one JSON object per log line
    pub json_logs: bool,
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. With the `otel` feature, spans are
/// also exported to stdout through OpenTelemetry.
pub fn init_observability(config: ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "otel")]
    {
        registry.with(otel_layer(&config.service_name)).try_init()?;
    }
    #[cfg(not(feature = "otel"))]
    {
        registry.try_init()?;
        tracing::debug!(service = %config.service_name, "Span export disabled");
    }

    Ok(())
}

#[cfg(feature = "otel")]
fn otel_layer<S>(service_name: &str) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            env!("CARGO_PKG_VERSION"),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_string()))
}

/// Flush exported spans before exit.
///
/// The stdout exporter flushes when its provider drops, so this only matters
/// once a batching exporter is configured.
pub fn shutdown_observability() {
    tracing::debug!("Observability shut down");
}
