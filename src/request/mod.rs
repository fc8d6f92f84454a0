//! Request pipeline: remote catalog interface, failure boundary and outcome type.
//!
//! # Flow
//!
//! ```text
//! Catalog::search_request ──> host web request ──> worker: normalize(decode) ──> RequestOutcome
//! ```
//!
//! - [`catalog`]: builds the HTTP request for a query
//! - [`normalizer`]: turns a fallible operation into a [`RequestOutcome`]
//! - [`outcome`]: the two-variant result and its dispatcher

pub mod catalog;
pub mod normalizer;
pub mod outcome;

pub use catalog::{Catalog, CatalogRequest, HttpCatalog, QUERY_CONTEXT_KEY};
pub use normalizer::{decode_search_response, normalize};
pub use outcome::RequestOutcome;
