//! Search input component renderer.
//!
//! Renders the caption, a bordered input box with the query, and the action
//! control at the right edge of the box.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Drawn after the query while the input has focus.
const CURSOR: char = '▏';

/// Renders the search block starting at `row`.
///
/// # Returns
///
/// The next available row (`row + 4`: caption plus a three-line box).
///
/// # Layout
///
/// ```text
///   DIGITE AUTOR OU NOME DO LIVRO
///   ┌──────────────────────────────────────────┐
///   │ machado de assis▏         [ Procurar ]   │
///   └──────────────────────────────────────────┘
/// ```
///
/// The query keeps its tail visible when it is longer than the box.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.label_fg));
    print!("{}", search.label);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let button = format!("[ {} ]", search.button_label);
    let button_len = char_len(&button);
    let query_width = inner_width.saturating_sub(button_len + 3);

    let mut query: String = if search.focused {
        format!("{}{CURSOR}", search.query)
    } else {
        search.query.clone()
    };
    let query_len = char_len(&query);
    if query_len > query_width {
        query = query.chars().skip(query_len - query_width).collect();
    }
    let padding = inner_width.saturating_sub(1 + char_len(&query) + button_len + 1);

    position_cursor(row + 2, 1);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!(" {query}");
    print!("{}", " ".repeat(padding));
    if search.busy {
        print!("{}", Theme::fg(&theme.colors.busy_fg));
    } else {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.button_fg));
    }
    print!("{button} ");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 4
}
