//! Subscriber setup: `tracing` → OpenTelemetry → OTLP/JSON file.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name.
pub const SERVICE_NAME: &str = "Bookfinder";

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookfinder-otlp.json";

/// Filter used when no `trace_level` is configured or it does not parse.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Best effort: returns `false` without installing anything if the data
/// directory cannot be created or a subscriber is already set. Safe to call
/// from both the plugin and the worker thread.
///
/// The filter comes from `config.trace_level`, using `EnvFilter` directive
/// syntax (`debug`, `bookfinder=trace`, ...).
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(level_filter(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init()
        .is_ok()
}

fn level_filter(level: Option<&str>) -> EnvFilter {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back_to_default() {
        assert_eq!(level_filter(Some("bookfinder=loud")).to_string(), DEFAULT_LEVEL);
        assert_eq!(level_filter(None).to_string(), DEFAULT_LEVEL);
    }

    #[test]
    fn valid_directives_are_kept() {
        assert_eq!(level_filter(Some("bookfinder=debug")).to_string(), "bookfinder=debug");
    }
}
