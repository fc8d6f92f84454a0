//! Book card list renderer.
//!
//! Each card takes a fixed number of rows so the list can be windowed by
//! whole cards:
//!
//! ```text
//!   Título:    Dom Casmurro
//!   Autor:     Machado de Assis
//!   Descrição: Bentinho narra sua juventude e o casamento com
//!              Capitu, desconfiando de uma traição que…
//!   Capa:      https://…/dom-casmurro-p.jpg      (selected card only)
//! ```

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BookCard;

const TITLE_LABEL: &str = "Título:";
const AUTHOR_LABEL: &str = "Autor:";
const SYNOPSIS_LABEL: &str = "Descrição:";
const COVER_LABEL: &str = "Capa:";

/// Width of the label column, including the gap before the value.
const LABEL_COLUMN: usize = 12;
const INDENT: usize = 2;

/// Renders all cards starting at `row` and returns the row after the last one.
pub fn render_cards(row: usize, cards: &[BookCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        render_card(current_row, card, theme, cols);
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card(row: usize, card: &BookCard, theme: &Theme, cols: usize) {
    let base_fg = if card.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    render_field(row, Some(TITLE_LABEL), &card.title, &card.title_highlights, card, theme, base_fg, cols);
    render_field(row + 1, Some(AUTHOR_LABEL), &card.author, &card.author_highlights, card, theme, base_fg, cols);

    let mut synopsis = card.synopsis.iter();
    let first = synopsis.next().map_or("", String::as_str);
    let second = synopsis.next().map_or("", String::as_str);
    let label = (!card.synopsis.is_empty()).then_some(SYNOPSIS_LABEL);
    render_field(row + 2, label, first, &[], card, theme, base_fg, cols);
    render_field(row + 3, None, second, &[], card, theme, base_fg, cols);

    if let Some(cover) = &card.cover {
        render_field(row + 4, Some(COVER_LABEL), cover, &[], card, theme, base_fg, cols);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_field(
    row: usize,
    label: Option<&str>,
    value: &str,
    highlights: &[(usize, usize)],
    card: &BookCard,
    theme: &Theme,
    base_fg: &str,
    cols: usize,
) {
    position_cursor(row, 1);
    if card.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }
    print!("{}", " ".repeat(INDENT));

    let label = label.unwrap_or("");
    if card.is_selected {
        print!("{}", Theme::fg(base_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.label_fg));
    }
    print!("{}", Theme::bold());
    print!("{:<width$}", label, width = LABEL_COLUMN);
    print!("{}", Theme::reset());
    if card.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    print!("{}", Theme::fg(base_fg));
    helpers::render_highlighted_text(value, highlights, theme, base_fg, card.is_selected);

    let used = INDENT + LABEL_COLUMN.max(char_len(label)) + char_len(value);
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}
