//! Notice bar for transient messages such as request failures.

use crate::ui::helpers::{char_len, position_cursor, truncate_with_ellipsis};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeInfo;

/// Renders the notice as a full-width colored bar at `row`.
pub fn render_notice(row: usize, notice: &NoticeInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate_with_ellipsis(&format!(" ! {}", notice.message), cols);
    let len = char_len(&text);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.notice_fg));
    print!("{}", Theme::bg(&theme.colors.notice_bg));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(len)));
    print!("{}", Theme::reset());
    row + 1
}
