//! Span exporter that appends OTLP/JSON batches to a rotating file.
//!
//! Zellij plugins run in a WASI sandbox without network access for
//! collectors, so spans go to the plugin data directory instead.

use super::otlp;
use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one line of OTLP/JSON.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    scope: &'static str,
    shut_down: AtomicBool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, self.scope, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports every finished span immediately.
///
/// # Parameters
///
/// * `trace_file` - Live OTLP/JSON file; backups are created next to it
/// * `resource` - Attributes attached to every batch (service name)
/// * `scope` - Instrumentation scope name written in each batch
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(trace_file),
        resource: resource.clone(),
        scope,
        shut_down: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
