//! Event handling and state transition logic.
//!
//! This module translates user input, host callbacks and worker responses
//! into state changes and side-effect actions. It is the only place where the
//! search pipeline is driven forward:
//!
//! 1. `Submit` starts the request and emits [`Action::FetchBooks`]
//! 2. `CatalogResponded` forwards the raw answer to the worker
//! 3. `WorkerResponse` applies the normalized outcome to the store
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::{handle_event, AppState, Event};
//! use bookfinder::request::HttpCatalog;
//! use bookfinder::ui::Theme;
//!
//! let catalog = HttpCatalog::new("https://example.org/book", "titulo");
//! let mut state = AppState::new(Box::new(catalog), Theme::default(), 2000);
//! let (render, actions) = handle_event(&mut state, &Event::Char('a'))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), bookfinder::domain::BookfinderError>(())
//! ```

use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::{BookfinderError, Result};
use crate::request::RequestOutcome;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query (typing mode only).
    Char(char),
    /// Removes the last character of the query (typing mode only).
    Backspace,
    /// Submits the current query.
    Submit,
    /// Moves focus to the query input.
    FocusInput,
    /// Moves focus to the result list.
    FocusResults,
    /// Moves the selection down by one card (wraps to top).
    KeyDown,
    /// Moves the selection up by one card (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// The host finished a catalog web request.
    CatalogResponded {
        /// Query recorded in the request context.
        query: String,
        /// HTTP status as reported by the host.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// A notice expiry timer fired.
    NoticeExpired,

    /// Reports whether the web access permission was granted.
    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// `(should_render, actions)`. Rendering is requested when the event changed
/// visible state, which includes every write the store published while the
/// event was handled.
///
/// # Errors
///
/// Currently infallible for well-formed events; the `Result` is kept so the
/// plugin shim has one error path for all event sources.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    let (render, actions) = dispatch_event(state, event)?;
    let store_published = state.take_render_request();

    tracing::debug!(render, store_published, action_count = actions.len(), "event handled");
    Ok((render || store_published, actions))
}

fn dispatch_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.query_input.push(*c);
            tracing::trace!(query = %state.query_input, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            Ok((state.query_input.pop().is_some(), vec![]))
        }
        Event::Submit => {
            let text = state.query_input.clone();
            let actions = state.submit_query(&text);
            Ok((true, actions))
        }
        Event::FocusInput => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::CatalogResponded { query, status, body } => {
            tracing::debug!(query = %query, status, body_len = body.len(), "catalog responded");

            match String::from_utf8(body.clone()) {
                Ok(text) => Ok((
                    false,
                    vec![Action::PostToWorker(WorkerMessage::decode_search(
                        query.clone(),
                        *status,
                        text,
                    ))],
                )),
                Err(e) => {
                    let error = BookfinderError::RequestFailed(format!("corpo da resposta não é UTF-8: {e}"));
                    let actions = state.complete_request(RequestOutcome::Failure(error.to_string()));
                    Ok((true, actions))
                }
            }
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::SearchCompleted { query, outcome } => {
                tracing::debug!(query = %query, outcome = outcome.kind(), "search completed");
                let actions = state.complete_request(outcome.clone());
                Ok((true, actions))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                let actions = state.complete_request(RequestOutcome::Failure(message.clone()));
                Ok((true, actions))
            }
        },
        Event::NoticeExpired => Ok((state.expire_notice(), vec![])),
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted, "web access permission result");
            state.web_access = *granted;
            if *granted {
                Ok((false, vec![]))
            } else {
                let actions = state.show_notice("Permissão de acesso à rede negada");
                Ok((true, actions))
            }
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::Submit => "submit",
        Event::FocusInput => "focus_input",
        Event::FocusResults => "focus_results",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::CloseFocus => "close_focus",
        Event::CatalogResponded { .. } => "catalog_responded",
        Event::WorkerResponse(_) => "worker_response",
        Event::NoticeExpired => "notice_expired",
        Event::PermissionsResult { .. } => "permissions_result",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpCatalog;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(
            Box::new(HttpCatalog::new("https://example.org/book", "titulo")),
            Theme::default(),
            2000,
        )
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn typing_is_ignored_while_browsing() {
        let mut state = state();
        type_text(&mut state, "ab");
        handle_event(&mut state, &Event::FocusResults).unwrap();

        let (render, _) = handle_event(&mut state, &Event::Char('c')).unwrap();
        assert!(!render);
        assert_eq!(state.query_input, "ab");
    }

    #[test]
    fn backspace_on_empty_query_does_not_render() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
    }

    #[test]
    fn submit_emits_fetch_for_typed_query() {
        let mut state = state();
        type_text(&mut state, "joyce");

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::FetchBooks(r)] if r.query() == Some("joyce")));
    }

    #[test]
    fn catalog_answer_is_forwarded_to_worker() {
        let mut state = state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::CatalogResponded {
                query: "joyce".to_string(),
                status: 200,
                body: b"{}".to_vec(),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::DecodeSearch { status: 200, .. })]
        ));
    }

    #[test]
    fn non_utf8_answer_fails_the_request() {
        let mut state = state();
        handle_event(&mut state, &Event::Submit).unwrap();
        type_text(&mut state, "x");
        handle_event(&mut state, &Event::Submit).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::CatalogResponded {
                query: "x".to_string(),
                status: 200,
                body: vec![0xff, 0xfe],
            },
        )
        .unwrap();

        assert!(render);
        assert!(!state.store().loading());
        assert!(matches!(actions.as_slice(), [Action::ScheduleNoticeExpiry { .. }]));
    }

    #[test]
    fn worker_error_clears_loading() {
        let mut state = state();
        type_text(&mut state, "joyce");
        handle_event(&mut state, &Event::Submit).unwrap();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "bad payload".to_string(),
            }),
        )
        .unwrap();

        assert!(!state.store().loading());
        assert_eq!(state.notice.as_deref(), Some("bad payload"));
    }

    #[test]
    fn undecodable_worker_reply_clears_loading() {
        let mut state = state();
        type_text(&mut state, "joyce");
        handle_event(&mut state, &Event::Submit).unwrap();

        let response = WorkerResponse::from_payload(r#"{"SearchCompleted":{"query":1}}"#);
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(render);
        assert!(!state.store().loading());
        assert!(matches!(state.store().state(), crate::app::ViewState::Error(_)));
        assert!(state
            .notice
            .as_deref()
            .is_some_and(|n| n.starts_with("Worker communication error")));
        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { millis: 2000 }]);
        assert!(!state.compute_viewmodel(24, 80).search_bar.busy);
    }

    #[test]
    fn denied_permission_shows_notice() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();

        assert!(render);
        assert!(!state.web_access);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn notice_expiry_requests_render_once() {
        let mut state = state();
        handle_event(&mut state, &Event::Submit).unwrap();

        let (first, _) = handle_event(&mut state, &Event::NoticeExpired).unwrap();
        let (second, _) = handle_event(&mut state, &Event::NoticeExpired).unwrap();
        assert!(first);
        assert!(!second);
    }

    /// Drives one search through submit, host answer and worker decoding.
    fn run_search(state: &mut AppState, query: &str, status: u16, body: &str) -> Vec<Action> {
        state.query_input = query.to_string();
        let (_, actions) = handle_event(state, &Event::Submit).unwrap();
        let [Action::FetchBooks(request)] = actions.as_slice() else {
            panic!("expected a catalog request, got {actions:?}");
        };
        assert!(state.store().loading());

        let (_, actions) = handle_event(
            state,
            &Event::CatalogResponded {
                query: request.query().unwrap_or_default().to_string(),
                status,
                body: body.as_bytes().to_vec(),
            },
        )
        .unwrap();
        let [Action::PostToWorker(message)] = actions.as_slice() else {
            panic!("expected a worker message, got {actions:?}");
        };

        let response = crate::worker::BookfinderWorker::default().handle_message(message.clone());
        let (render, actions) = handle_event(state, &Event::WorkerResponse(response)).unwrap();
        assert!(render);
        actions
    }

    #[test]
    fn search_with_one_match_lists_it() {
        let mut state = state();
        let body = r#"{"status":{"success":true},"books":[{"titulo":"Ulysses","contribuicao":[{"nome":"James","sobrenome":"Joyce"}]}]}"#;

        let actions = run_search(&mut state, "joyce", 200, body);

        assert!(actions.is_empty());
        assert!(!state.store().loading());
        assert_eq!(state.book_count(), 1);
        let book = state.selected_book().unwrap();
        assert_eq!(book.title, "Ulysses");
        assert_eq!(book.author, "James Joyce");
    }

    #[test]
    fn search_without_records_shows_server_message() {
        let mut state = state();
        let body = r#"{"status":{"success":false,"message":"Nenhum registro foi encontrado"},"books":[]}"#;

        run_search(&mut state, "zzzzz", 200, body);

        assert_eq!(
            state.results,
            crate::app::ResultsPane::NoRecords("Nenhum registro foi encontrado".to_string())
        );
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.empty_state.map(|e| e.message).as_deref(),
            Some("Nenhum registro foi encontrado")
        );
        assert!(state.notice.is_none());
    }

    #[test]
    fn failed_search_keeps_previous_results_and_shows_notice() {
        let mut state = state();
        let body = r#"{"status":{"success":true},"books":[{"titulo":"Dubliners"}]}"#;
        run_search(&mut state, "joyce", 200, body);

        let actions = run_search(&mut state, "joyce again", 503, "Service Unavailable");

        assert!(!state.store().loading());
        assert!(matches!(state.store().state(), crate::app::ViewState::Error(_)));
        assert_eq!(state.book_count(), 1);
        assert_eq!(
            state.notice.as_deref(),
            Some("O catálogo respondeu com status 503: Service Unavailable")
        );
        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { millis: 2000 }]);
    }

    #[test]
    fn loading_clears_before_the_outcome_is_published() {
        use crate::app::StoreEvent;
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut state = state();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        state.store_mut().subscribe(move |event| {
            let entry = match event {
                StoreEvent::Loading(loading) => format!("loading:{loading}"),
                StoreEvent::State(view) => format!("state:{}", view.name()),
            };
            sink.borrow_mut().push(entry);
        });

        run_search(&mut state, "joyce", 500, "");

        assert_eq!(*log.borrow(), vec!["loading:true", "loading:false", "state:error"]);
    }
}
