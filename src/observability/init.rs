//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::domain::Result;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "Pitwall";

/// Level used when the configuration does not name one.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` at the configured level feeding
/// an OpenTelemetry layer that exports to the trace file.
///
/// Only the first successful call installs a subscriber; later calls are no-ops.
///
/// # Errors
///
/// Returns [`PitwallError::Io`](crate::domain::PitwallError::Io) if the data
/// directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config
        .trace_level
        .as_deref()
        .unwrap_or(DEFAULT_TRACE_LEVEL);

    std::fs::create_dir_all(paths::get_data_dir())?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = exporter::file_tracer_provider(paths::trace_file_path(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();

    Ok(())
}
