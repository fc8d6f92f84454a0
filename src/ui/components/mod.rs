//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at an explicit row and
//! returns the next free row, so layouts are plain sequences of calls.
//!
//! - [`header`]: Title bar with result count
//! - [`search`]: Caption, input box and action control
//! - [`cards`]: Book cards with match highlighting
//! - [`empty`]: Message for searches without results
//! - [`notice`]: Transient failure bar
//! - [`footer`]: Keybinding hints

mod cards;
mod empty;
mod footer;
mod header;
mod notice;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use notice::render_notice;
use search::render_search_bar;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search block - 4 lines]
/// [Cards | Empty state | nothing]
/// [Notice, when present]
/// [Border]
/// [Footer]
/// ```
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        render_cards(current_row, &vm.cards, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    if let Some(notice) = &vm.notice {
        render_notice(notice_row, notice, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
