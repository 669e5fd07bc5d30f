//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Traces are written to `~/.local/share/zellij/pitwall/pitwall-otlp.json`
//! - Files rotate at 10MB, keeping 3 numbered backups
//! - Spans continue across web requests: the trace context rides in the
//!   request context map and is re-attached when the response arrives
//!
//! The level comes from the `trace_level` plugin option (default `"info"`),
//! using `EnvFilter` directive syntax (e.g. `"pitwall=debug"`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: File span exporter and tracer provider
//! - [`otlp`]: OTLP JSON encoding
//! - [`file_writer`]: Size-rotated line writer

mod exporter;
mod file_writer;
mod init;
mod otlp;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME};
