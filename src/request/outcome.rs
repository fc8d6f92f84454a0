//! Normalized result of one catalog request.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome of a single asynchronous request.
///
/// Produced once per request by [`normalize`](super::normalize) and consumed
/// once by whoever owns the view state. It is serializable so the worker can
/// hand it back to the plugin thread unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome<T> {
    /// The request completed and produced a value.
    Success(T),
    /// The request failed; the message is ready for display.
    Failure(String),
}

impl<T> RequestOutcome<T> {
    /// Invokes exactly one of the two continuations, matching the tag.
    ///
    /// Both continuations return the same type, which makes it convenient to
    /// map an outcome straight into another two-variant type:
    ///
    /// ```
    /// use bookfinder::app::store::ViewState;
    /// use bookfinder::request::RequestOutcome;
    ///
    /// let outcome: RequestOutcome<u32> = RequestOutcome::Failure("offline".into());
    /// let state = outcome.dispatch(ViewState::Success, ViewState::Error);
    /// assert_eq!(state, ViewState::Error("offline".into()));
    /// ```
    pub fn dispatch<R>(
        self,
        on_success: impl FnOnce(T) -> R,
        on_error: impl FnOnce(String) -> R,
    ) -> R {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(message) => on_error(message),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

impl<T, E: Display> From<std::result::Result<T, E>> for RequestOutcome<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispatch_runs_only_the_success_branch() {
        let errors = Cell::new(0);
        let seen = RequestOutcome::Success(7).dispatch(
            |v| v * 2,
            |_| {
                errors.set(errors.get() + 1);
                0
            },
        );
        assert_eq!(seen, 14);
        assert_eq!(errors.get(), 0);
    }

    #[test]
    fn dispatch_runs_only_the_error_branch() {
        let successes = Cell::new(0);
        let message = RequestOutcome::<u8>::Failure("timeout".to_string()).dispatch(
            |_| {
                successes.set(successes.get() + 1);
                String::new()
            },
            |m| m,
        );
        assert_eq!(message, "timeout");
        assert_eq!(successes.get(), 0);
    }

    #[test]
    fn converts_from_result_using_display() {
        let ok: RequestOutcome<i32> = Ok::<_, std::fmt::Error>(1).into();
        assert_eq!(ok, RequestOutcome::Success(1));

        let err: RequestOutcome<i32> = Err::<i32, _>("boom").into();
        assert_eq!(err, RequestOutcome::Failure("boom".to_string()));
        assert_eq!(err.kind(), "failure");
        assert!(!err.is_success());
    }

    #[test]
    fn survives_a_json_round_trip_between_threads() {
        let outcome = RequestOutcome::<Vec<String>>::Failure("no route".to_string());
        let wire = serde_json::to_string(&outcome).unwrap();
        let back: RequestOutcome<Vec<String>> = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, outcome);
    }
}
