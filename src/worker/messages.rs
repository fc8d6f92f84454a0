//! Worker thread message types for cross-thread communication.
//!
//! Defines the protocol between the plugin thread and the background worker
//! that decodes catalog responses, plus the trace context that links worker
//! spans to the plugin span that posted the message.

use crate::domain::{BookfinderError, Result, SearchResponse};
use crate::request::RequestOutcome;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when tracing is not initialized or the span context is
    /// invalid, in which case the worker simply starts a fresh trace.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Validate and decode a raw catalog answer.
    DecodeSearch {
        /// Query the answer belongs to (for logs; responses are not fenced).
        query: String,

        /// HTTP status reported by the host.
        status: u16,

        /// Response body as UTF-8 text.
        body: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `DecodeSearch` message carrying the current trace context.
    #[must_use]
    pub fn decode_search(query: String, status: u16, body: String) -> Self {
        Self::DecodeSearch {
            query,
            status,
            body,
            trace_context: TraceContext::from_current(),
        }
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::DecodeSearch { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Serializes the message for `post_message_to`.
    ///
    /// # Errors
    ///
    /// Returns [`BookfinderError::Worker`] if the message cannot be encoded.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BookfinderError::Worker(e.to_string()))
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A catalog answer was normalized.
    SearchCompleted {
        query: String,
        outcome: RequestOutcome<SearchResponse>,
    },

    /// The worker could not process a message at all.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Wraps a protocol failure as [`WorkerResponse::Error`].
    pub fn worker_error(error: impl Display) -> Self {
        Self::Error {
            message: BookfinderError::Worker(error.to_string()).to_string(),
        }
    }

    /// Decodes a reply posted by the worker.
    ///
    /// Never fails: an undecodable payload becomes [`WorkerResponse::Error`],
    /// so the pending request still completes.
    ///
    /// ```rust
    /// use bookfinder::worker::WorkerResponse;
    ///
    /// let response = WorkerResponse::from_payload("not json");
    /// assert!(matches!(response, WorkerResponse::Error { .. }));
    /// ```
    #[must_use]
    pub fn from_payload(payload: &str) -> Self {
        serde_json::from_str(payload).unwrap_or_else(|e| {
            tracing::warn!(error = %e, payload_len = payload.len(), "undecodable worker response");
            Self::worker_error(e)
        })
    }

    /// Encodes the reply for `post_message_to_plugin`.
    ///
    /// If the response itself cannot be encoded, an `Error` reply carrying the
    /// encoding failure is sent instead.
    #[must_use]
    pub fn to_payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize worker response");
            let message = BookfinderError::Worker(e.to_string()).to_string();
            serde_json::json!({ "Error": { "message": message } }).to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_search_without_tracing_has_no_context() {
        let message = WorkerMessage::decode_search("joyce".to_string(), 200, "{}".to_string());
        assert_eq!(message.trace_context(), None);
    }

    #[test]
    fn messages_omit_absent_trace_context_on_the_wire() {
        let message = WorkerMessage::DecodeSearch {
            query: "joyce".to_string(),
            status: 200,
            body: "{}".to_string(),
            trace_context: None,
        };
        let wire = serde_json::to_string(&message).unwrap();
        assert!(!wire.contains("trace_context"));

        let back: WorkerMessage = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn undecodable_reply_becomes_worker_error() {
        let response = WorkerResponse::from_payload(r#"{"SearchCompleted":{"query":1}}"#);
        let WorkerResponse::Error { message } = response else {
            panic!("expected an error reply, got {response:?}");
        };
        assert!(message.starts_with("Worker communication error"));
    }

    #[test]
    fn reply_payload_decodes_back() {
        let response = WorkerResponse::SearchCompleted {
            query: "joyce".to_string(),
            outcome: RequestOutcome::Failure("offline".to_string()),
        };
        assert_eq!(WorkerResponse::from_payload(&response.to_payload()), response);
    }

    #[test]
    fn error_reply_shape_matches_the_enum() {
        let wire = serde_json::json!({ "Error": { "message": "x" } }).to_string();
        assert_eq!(
            WorkerResponse::from_payload(&wire),
            WorkerResponse::Error { message: "x".to_string() }
        );
    }
}
