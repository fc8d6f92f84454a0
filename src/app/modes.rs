//! Input focus state for the search screen.
//!
//! The screen has two focus targets: the query input and the result list.
//! The focus determines how keys are interpreted and which hints the footer
//! shows.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::modes::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Typing);
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The query input has focus.
    ///
    /// Printable characters edit the query, backspace deletes, enter submits
    /// and escape or tab move focus to the results.
    #[default]
    Typing,

    /// The result list has focus.
    ///
    /// j/k and the arrow keys move the selection, enter, `/` or `i` return to
    /// the input and q closes the pane.
    Browsing,
}

impl InputMode {
    /// Returns `true` when keystrokes should be routed to the query input.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }
}
