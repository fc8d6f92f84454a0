//! Error types for the Bookfinder plugin.
//!
//! [`BookfinderError`] is the single error type used across the crate, with a
//! [`Result`] alias for convenience. Every variant renders a message that is
//! safe to show to the user, because the request normalizer turns errors into
//! the text of a failure notice.

use thiserror::Error;

/// Maximum number of characters of a response body quoted in an error.
const BODY_EXCERPT_CHARS: usize = 120;

/// The main error type for Bookfinder operations.
///
/// Request-layer failures (transport, HTTP status, decoding) all end up as a
/// `RequestOutcome::Failure` carrying this type's `Display` output; the store
/// never distinguishes between them.
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// The catalog request could not be issued or the host reported a
    /// transport failure.
    #[error("Falha na requisição: {0}")]
    RequestFailed(String),

    /// The catalog answered with a status outside the 2xx range.
    ///
    /// `excerpt` holds the first characters of the body, which usually
    /// contains the server's own explanation.
    #[error("O catálogo respondeu com status {status}: {excerpt}")]
    HttpStatus {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Truncated response body.
        excerpt: String,
    },

    /// The catalog response body was not the expected JSON document.
    #[error("Resposta inválida do catálogo: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookfinderError {
    /// Builds an [`BookfinderError::HttpStatus`] quoting the start of `body`.
    #[must_use]
    pub fn http_status(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let mut excerpt: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
        if trimmed.chars().count() > BODY_EXCERPT_CHARS {
            excerpt.push('…');
        }
        if excerpt.is_empty() {
            excerpt.push_str("(sem corpo)");
        }
        Self::HttpStatus { status, excerpt }
    }
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;
