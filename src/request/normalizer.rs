//! Failure boundary around catalog calls.
//!
//! [`normalize`] runs an operation once and turns whatever it produced into a
//! [`RequestOutcome`]. Nothing escapes as an error past this point; callers
//! only ever see `Success` or `Failure(message)`.

use super::RequestOutcome;
use crate::domain::error::{BookfinderError, Result};
use crate::domain::SearchResponse;
use std::fmt::Display;

/// Runs `operation` exactly once and normalizes its result.
///
/// Failures are logged at `warn` and converted to their `Display` text.
pub fn normalize<T, E, F>(operation: F) -> RequestOutcome<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: Display,
{
    match operation() {
        Ok(value) => RequestOutcome::Success(value),
        Err(e) => {
            let message = e.to_string();
            tracing::warn!(error = %message, "request failed");
            RequestOutcome::Failure(message)
        }
    }
}

/// Validates the HTTP status of a catalog answer and decodes its body.
///
/// # Errors
///
/// - [`BookfinderError::HttpStatus`] for any status outside `200..=299`
/// - [`BookfinderError::Decode`] when the body is not a valid search document
pub fn decode_search_response(status: u16, body: &str) -> Result<SearchResponse> {
    if !(200..=299).contains(&status) {
        return Err(BookfinderError::http_status(status, body));
    }

    let response: SearchResponse = serde_json::from_str(body)?;
    tracing::debug!(
        success = ?response.status.success,
        book_count = response.books().count(),
        "catalog response decoded"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn runs_the_operation_exactly_once() {
        let calls = Cell::new(0);
        let outcome = normalize(|| {
            calls.set(calls.get() + 1);
            Ok::<_, BookfinderError>("done")
        });
        assert_eq!(outcome, RequestOutcome::Success("done"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failures_become_their_display_text() {
        let outcome: RequestOutcome<()> =
            normalize(|| Err(BookfinderError::RequestFailed("connection reset".to_string())));
        assert_eq!(
            outcome,
            RequestOutcome::Failure("Falha na requisição: connection reset".to_string())
        );
    }

    #[test]
    fn non_2xx_status_is_a_failure_even_with_json_body() {
        let body = r#"{"status":{"success":true},"books":[]}"#;
        let outcome = normalize(|| decode_search_response(502, body));
        let RequestOutcome::Failure(message) = outcome else {
            panic!("expected failure");
        };
        assert!(message.contains("502"));
    }

    #[test]
    fn malformed_body_is_a_decode_failure() {
        let outcome = normalize(|| decode_search_response(200, "<html>oops</html>"));
        let RequestOutcome::Failure(message) = outcome else {
            panic!("expected failure");
        };
        assert!(message.starts_with("Resposta inválida do catálogo"));
    }

    #[test]
    fn unsuccessful_payload_is_still_a_success_outcome() {
        let body = r#"{"status":{"success":false,"message":"Nenhum registro foi encontrado"}}"#;
        let outcome = normalize(|| decode_search_response(200, body));
        let RequestOutcome::Success(response) = outcome else {
            panic!("expected success");
        };
        assert!(!response.is_successful());
        assert_eq!(
            response.status.message.as_deref(),
            Some("Nenhum registro foi encontrado")
        );
    }
}
