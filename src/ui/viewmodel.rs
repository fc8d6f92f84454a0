//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They carry display-ready text only: truncation, wrapping,
//! labels and highlight ranges are all resolved before rendering.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Query input and action control.
    pub search_bar: SearchBarInfo,

    /// Book cards inside the visible window.
    pub cards: Vec<BookCard>,

    /// Index of the selected card within `cards`.
    pub selected_index: usize,

    /// Message shown instead of cards when a search found nothing.
    pub empty_state: Option<EmptyState>,

    /// Transient message above the footer.
    pub notice: Option<NoticeInfo>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Display information for one book.
///
/// Highlight ranges are `(start, end)` character indices into the already
/// truncated `title` and `author`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    /// Up to two wrapped lines; empty when the book has no synopsis.
    pub synopsis: Vec<String>,
    /// Cover image URL, only filled in on the selected card.
    pub cover: Option<String>,
    pub is_selected: bool,
    pub title_highlights: Vec<(usize, usize)>,
    pub author_highlights: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message, taken from the catalog when it provides one.
    pub message: String,

    /// Secondary hint.
    pub subtitle: String,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Caption above the input box.
    pub label: String,
    /// Current query text.
    pub query: String,
    /// Text of the action control, switches while a request is in flight.
    pub button_label: String,
    pub busy: bool,
    /// Whether keystrokes go to the input.
    pub focused: bool,
}

/// Transient notice, usually a request failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub message: String,
}
