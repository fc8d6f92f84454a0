//! Background worker for decoding catalog responses.
//!
//! Uses Zellij's worker API so that JSON decoding of search results happens
//! off the rendering thread. Results come back as [`WorkerResponse`] messages
//! and are applied to the view state on the plugin's update tick.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::BookfinderWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
