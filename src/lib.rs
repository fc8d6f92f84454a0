//! Bookfinder: a Zellij plugin for searching a book catalog.
//!
//! Type an author or title, press Enter, and the plugin queries a remote
//! catalog over HTTP and lists the matching books as cards with title, author
//! and a short synopsis. Failures appear as a transient notice without
//! clearing the results already on screen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host events / commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions                          │
//! │  - AppState controller + ViewStateStore             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Request Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (request/)    │   │ (worker/)     │
//! │ - Projector   │   │ - Catalog     │   │ - Decoding    │
//! │ - Components  │   │ - Normalizer  │   │ - Trace links │
//! │ - Theming     │   │ - Outcome     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (book payload, errors) & Infrastructure     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Search flow
//!
//! 1. `Event::Submit` → [`AppState::submit_query`] marks the store as loading
//!    and returns [`Action::FetchBooks`]
//! 2. The shim issues a host `web_request`; the answer arrives as
//!    `WebRequestResult` and becomes `Event::CatalogResponded`
//! 3. The body is posted to the worker, which validates the status and
//!    decodes it inside [`request::normalize`]
//! 4. The worker's [`request::RequestOutcome`] is applied to the store and the
//!    projector decides what the result area shows
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookfinder.wasm" {
//!         api_url "https://api.mercadoeditorial.org/api/v1.2/book"
//!         query_param "titulo"
//!         notice_ms "2000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "machado".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchBooks(_)]));
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod request;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{BookfinderError, Result};
pub use ui::Theme;

use request::HttpCatalog;
use std::collections::BTreeMap;

/// Catalog endpoint used when `api_url` is not configured.
pub const DEFAULT_API_URL: &str = "https://api.mercadoeditorial.org/api/v1.2/book";

/// Query parameter used when `query_param` is not configured.
pub const DEFAULT_QUERY_PARAM: &str = "titulo";

/// Notice duration used when `notice_ms` is missing or invalid.
pub const DEFAULT_NOTICE_MS: u64 = 2000;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog search endpoint.
    pub api_url: String,

    /// Name of the URL parameter carrying the query.
    pub query_param: String,

    /// How long notices stay visible, in milliseconds.
    pub notice_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` and relative paths resolve under `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            notice_ms: DEFAULT_NOTICE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as missing. `notice_ms` must be a positive integer;
    /// anything else falls back to the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookfinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("query_param".to_string(), "q".to_string());
    /// map.insert("notice_ms".to_string(), "3500".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.query_param, "q");
    /// assert_eq!(config.notice_ms, 3500);
    /// assert_eq!(config.api_url, bookfinder::DEFAULT_API_URL);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let notice_ms = value("notice_ms").map_or(DEFAULT_NOTICE_MS, |raw| match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                tracing::debug!(notice_ms = %raw, "invalid notice duration, using default");
                DEFAULT_NOTICE_MS
            }
        });

        Self {
            api_url: value("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            query_param: value("query_param").unwrap_or_else(|| DEFAULT_QUERY_PARAM.to_string()),
            notice_ms,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }
}

/// Resolves the configured theme, falling back to the default on any error.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::resolve_host_path(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(
                theme_file = %infrastructure::display_path(&path),
                error = %e,
                "failed to load theme from file, using default"
            );
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the application state for `config`.
///
/// The HTTP catalog is created here and injected into [`AppState`]; an
/// invalid `api_url` is only reported when the first search is submitted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing bookfinder plugin");

    let catalog = HttpCatalog::new(&config.api_url, &config.query_param);
    AppState::new(Box::new(catalog), load_theme(config), config.notice_ms)
}
