//! Maps view state to a render branch.
//!
//! [`project`] is pure: given the loading flag and the current
//! [`ViewState`], it decides which of four branches the screen shows. The
//! busy indicator is reported alongside and never influences the branch.

use crate::app::store::ViewState;
use crate::domain::{Book, SearchResponse};

/// Message used when the catalog reports no results without saying why.
pub const NO_RECORDS_FALLBACK: &str = "Nenhum registro foi encontrado";

/// Display-ready fields of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub title: String,
    pub author: String,
    pub synopsis: Option<String>,
    pub cover_url: Option<String>,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title_line().to_string(),
            author: book.author_line(),
            synopsis: book.synopsis_text().map(str::to_string),
            cover_url: book.cover_url().map(str::to_string),
        }
    }
}

/// Which part of the screen the current state drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBranch {
    /// Successful search with at least one book.
    Books(Vec<BookRow>),
    /// Search completed but returned nothing usable.
    NoRecords { message: String },
    /// Request failed; shown as a transient notice over whatever is on screen.
    Notice { message: String },
    /// Nothing has completed yet: only the input controls are shown.
    Nothing,
}

/// Result of projecting the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Whether the action control shows its busy label.
    pub busy: bool,
    pub branch: RenderBranch,
}

/// Projects `(loading, state)` to a [`Projection`].
#[must_use]
pub fn project(loading: bool, state: &ViewState<SearchResponse>) -> Projection {
    let branch = match state {
        ViewState::Success(response) if response.is_successful() && response.has_books() => {
            RenderBranch::Books(response.books().map(BookRow::from).collect())
        }
        ViewState::Success(response) => RenderBranch::NoRecords {
            message: response
                .status
                .message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(NO_RECORDS_FALLBACK)
                .to_string(),
        },
        ViewState::Error(message) => RenderBranch::Notice {
            message: message.clone(),
        },
        ViewState::Idle => RenderBranch::Nothing,
    };

    Projection {
        busy: loading,
        branch,
    }
}
