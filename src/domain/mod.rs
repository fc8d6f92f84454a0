//! Domain layer for the Bookfinder plugin.
//!
//! Core types independent of Zellij APIs: the catalog payload model and the
//! crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Catalog response model and display helpers

pub mod book;
pub mod error;

pub use book::{Book, Contributor, ResponseStatus, SearchResponse, UNKNOWN_AUTHOR};
pub use error::{BookfinderError, Result};
