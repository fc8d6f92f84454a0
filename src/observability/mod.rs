//! Tracing with OpenTelemetry export to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → bookfinder-otlp.json
//! ```
//!
//! Traces land in `~/.local/share/zellij/bookfinder/` (seen as `/host/...`
//! from inside the sandbox). The file rotates at 10 MiB and keeps three
//! backups. Worker messages carry the posting span's IDs so worker spans join
//! the same trace.
//!
//! - [`init`]: subscriber installation and level filter
//! - `exporter`: `SpanExporter` writing to the trace file
//! - `otlp`: OTLP/JSON encoding
//! - `rotation`: size-based file rotation

mod exporter;
pub mod init;
mod otlp;
mod rotation;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
