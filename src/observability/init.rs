//! Subscriber setup: `tracing` macros → OpenTelemetry → trace file.

use super::exporter::{file_tracer_provider, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace output file inside the data directory.
pub const TRACE_FILE: &str = "zentask-otlp.json";

/// Installs the global subscriber, filtered by `config.trace_level`
/// (default `info`).
///
/// Spans land in `~/.local/share/zellij/zentask/zentask-otlp.json`. Tracing
/// is optional: if the data directory cannot be created the call does
/// nothing, and only the first call in a process takes effect.
///
/// ```rust,no_run
/// use zentask::observability::init_tracing;
/// use zentask::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    init_tracing_at(config, &data_dir);
}

/// Same as [`init_tracing`] with an explicit output directory.
pub fn init_tracing_at(config: &Config, dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![KeyValue::new("service.name", "ZenTask")]);
    let provider = file_tracer_provider(dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
