//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! Both the plugin and its worker call [`init_tracing`] once at startup.
//! The level comes from the `trace_level` plugin option and defaults to
//! `info`. The output file rotates at 10 MiB and three backups are kept.
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: OTLP JSON span exporter
//! - [`rotating`]: Size-rotated line writer

pub mod exporter;
mod init;
pub mod rotating;

pub use init::{init_tracing, init_tracing_at, TRACE_FILE};
