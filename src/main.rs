//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Bookfinder library and the Zellij
//! plugin system: host events are translated into library [`Event`]s and
//! library [`Action`]s into host commands.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  Zellij host                 │
//! │   web_request ──────────┐    │
//! │  ┌──────────────────┐   │    │
//! │  │  State (plugin)  │ ◄─┘ WebRequestResult
//! │  └──────────────────┘        │
//! │        │ IPC (JSON) ▲        │
//! │        ▼            │        │
//! │  ┌──────────────────┐        │
//! │  │ BookfinderWorker │  ← decode + normalize
//! │  └──────────────────┘        │
//! └──────────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move selection
//!
//! Typing (query input focused):
//! - characters: Edit query
//! - `Backspace`: Delete
//! - `Enter`: Search
//! - `Esc` / `Tab`: Focus results
//!
//! Browsing (results focused):
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`, `/`, `i`: Focus query input
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use bookfinder::request::QUERY_CONTEXT_KEY;
use bookfinder::worker::{BookfinderWorker, WorkerMessage, WorkerResponse};
use bookfinder::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(BookfinderWorker, bookfinder_worker, BOOKFINDER_WORKER);

/// Name used both for the worker and for its reply messages.
const WORKER_NAME: &str = "bookfinder";

struct State {
    app: bookfinder::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookfinder::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the app state, and registers with the host.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: catalog requests
    ///
    /// # Subscriptions
    ///
    /// `Key`, `WebRequestResult`, `CustomMessage` (worker replies), `Timer`
    /// (notice expiry) and `PermissionRequestResult`.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookfinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, query_param = %config.query_param, "parsed configuration");
        self.app = bookfinder::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_request_result(status, body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::NoticeExpired,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Handles `event` and executes its actions.
    ///
    /// An action that fails on the host side yields a follow-up event, which
    /// is handled in turn so the request it belonged to still completes.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((mut should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for action in &actions {
                    if let Some(follow_up) = Self::execute_action(action) {
                        should_render |= self.dispatch(&follow_up);
                    }
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc | BareKey::Tab => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter | BareKey::Char('/' | 'i') => Event::FocusInput,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Event {
        let query = context.get(QUERY_CONTEXT_KEY).cloned().unwrap_or_default();
        tracing::debug!(status, query = %query, body_len = body.len(), "web request result");
        Event::CatalogResponded { query, status, body }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        Some(Event::WorkerResponse(WorkerResponse::from_payload(payload)))
    }

    /// Posts `message` to the worker, or returns the failure as a worker reply.
    fn post_worker_message(message: &WorkerMessage) -> Option<Event> {
        match message.to_payload() {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
                Some(Event::WorkerResponse(WorkerResponse::Error { message: e.to_string() }))
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    ///
    /// Returns an event to feed back when the action could not be carried out.
    #[tracing::instrument(level = "debug")]
    #[allow(clippy::cast_precision_loss)]
    fn execute_action(action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchBooks(request) => {
                tracing::debug!(url = %request.url, "issuing catalog request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::PostToWorker(message) => return Self::post_worker_message(message),
            Action::ScheduleNoticeExpiry { millis } => set_timeout(*millis as f64 / 1000.0),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecodable_worker_reply_still_completes_the_search() {
        let mut state = State::default();
        state.app.query_input = "joyce".to_string();
        handle_event(&mut state.app, &Event::Submit).unwrap();
        assert!(state.app.store().loading());

        let event = State::map_custom_message_event(WORKER_NAME, r#"{"SearchCompleted":{"query":1}}"#)
            .expect("worker replies are never dropped");
        let (render, actions) = handle_event(&mut state.app, &event).unwrap();

        assert!(render);
        assert!(!state.app.store().loading());
        assert!(state.app.notice.is_some());
        assert!(matches!(actions.as_slice(), [Action::ScheduleNoticeExpiry { .. }]));
    }

    #[test]
    fn messages_for_other_names_are_ignored() {
        assert_eq!(State::map_custom_message_event("someone-else", "{}"), None);
    }
}
