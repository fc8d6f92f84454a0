//! Worker thread implementation for catalog response decoding.
//!
//! The plugin thread forwards raw web request results here so that JSON
//! decoding never blocks rendering. Each message is normalized into a
//! [`RequestOutcome`](crate::request::RequestOutcome) and posted back.

use crate::request::{decode_search_response, normalize};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Stateless apart from a counter used in logs; every message is handled on
/// its own.
#[derive(Serialize, Deserialize, Default)]
pub struct BookfinderWorker {
    #[serde(skip)]
    handled: u64,
}

impl BookfinderWorker {
    /// Rebuilds the plugin thread's span context so worker spans nest under it.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(trace_context: Option<&TraceContext>) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = trace_context?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(message.trace_context());

        self.handled += 1;
        let span = tracing::debug_span!("worker_handle_message", handled = self.handled);
        let _guard = span.entered();

        match message {
            WorkerMessage::DecodeSearch { query, status, body, .. } => {
                tracing::debug!(query = %query, status, body_len = body.len(), "decoding catalog response");
                let outcome = normalize(|| decode_search_response(status, &body));
                tracing::debug!(query = %query, outcome = outcome.kind(), "catalog response normalized");
                WorkerResponse::SearchCompleted { query, outcome }
            }
        }
    }

    fn reply(name: String, response: &WorkerResponse) {
        post_message_to_plugin(PluginMessage {
            name,
            payload: response.to_payload(),
            worker_name: None,
        });
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for BookfinderWorker {
    /// Entry point for messages from the plugin thread.
    ///
    /// Deserialization failures are reported back as
    /// [`WorkerResponse::Error`] so the plugin can clear its loading state.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::worker_error(e)
            }
        };

        Self::reply(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestOutcome;

    #[test]
    fn decodes_successful_answers() {
        let mut worker = BookfinderWorker::default();
        let body = r#"{"status":{"success":true},"books":[{"titulo":"Ulysses"}]}"#;
        let response = worker.handle_message(WorkerMessage::decode_search(
            "joyce".to_string(),
            200,
            body.to_string(),
        ));

        let WorkerResponse::SearchCompleted { query, outcome: RequestOutcome::Success(found) } = response else {
            panic!("expected a successful search");
        };
        assert_eq!(query, "joyce");
        assert_eq!(found.books().count(), 1);
    }

    #[test]
    fn failed_status_becomes_failure_outcome() {
        let mut worker = BookfinderWorker::default();
        let response = worker.handle_message(WorkerMessage::decode_search(
            "joyce".to_string(),
            500,
            "internal error".to_string(),
        ));

        assert!(matches!(
            response,
            WorkerResponse::SearchCompleted { outcome: RequestOutcome::Failure(_), .. }
        ));
    }

    #[test]
    fn malformed_trace_context_is_ignored() {
        let mut worker = BookfinderWorker::default();
        let response = worker.handle_message(WorkerMessage::DecodeSearch {
            query: "x".to_string(),
            status: 200,
            body: "{}".to_string(),
            trace_context: Some(TraceContext {
                trace_id: "not-hex".to_string(),
                parent_span_id: "zz".to_string(),
            }),
        });
        assert!(matches!(response, WorkerResponse::SearchCompleted { .. }));
    }
}
