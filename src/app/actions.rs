//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never talks to the host
//! directly. It returns a list of [`Action`]s and the plugin shim executes
//! them in order, which keeps the application layer testable without a
//! running Zellij.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::Action;
//! use bookfinder::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::decode_search("joyce".into(), 200, "{}".into())),
//!     Action::ScheduleNoticeExpiry { millis: 2000 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::request::CatalogRequest;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a catalog search through the host's web request API.
    ///
    /// The host answers with a `WebRequestResult` event carrying the
    /// request's context map.
    FetchBooks(CatalogRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Arms a timer after which the current notice is cleared.
    ScheduleNoticeExpiry {
        /// Delay in milliseconds.
        millis: u64,
    },
}
