//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the request, worker and UI
//! layers.
//!
//! # Architecture
//!
//! ```text
//! Key / host events → Event → handle_event → AppState + ViewStateStore → Actions
//!                                  ↑                                        ↓
//!                                  └──── WebRequestResult / worker replies ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Keyboard focus state
//! - [`state`]: Controller state and view model computation
//! - [`store`]: Observable loading flag and last request outcome

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, ResultsPane};
pub use store::{StoreEvent, SubscriptionId, ViewState, ViewStateStore};
