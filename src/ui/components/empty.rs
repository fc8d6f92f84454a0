//! Empty result message.

use crate::ui::helpers::{char_len, position_cursor, truncate_with_ellipsis};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered two-line empty state starting at `row`.
///
/// ```text
/// [padding] Nenhum registro foi encontrado [padding]
/// [padding]   Tente outro autor ou título  [padding]
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered(row, &empty.message, &theme.colors.empty_state_fg, false, cols);
    render_centered(row + 1, &empty.subtitle, &theme.colors.text_dim, true, cols);
    row + 2
}

fn render_centered(row: usize, text: &str, color: &str, dim: bool, cols: usize) {
    let text = truncate_with_ellipsis(text, cols);
    let len = char_len(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    if dim {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
