//! Shared rendering utilities.
//!
//! Text layout helpers here work on characters, not bytes, so catalog data
//! with accents ("Memórias Póstumas") never gets split inside a code point.
//!
//! - Cursor positioning and fuzzy match highlighting (print to stdout)
//! - Truncation and word wrapping with an ellipsis (pure)

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const ELLIPSIS: char = '…';

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in an ellipsis when cut.
///
/// ```rust
/// use bookfinder::ui::helpers::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Dom Casmurro", 20), "Dom Casmurro");
/// assert_eq!(truncate_with_ellipsis("Dom Casmurro", 6), "Dom C…");
/// ```
#[must_use]
pub fn truncate_with_ellipsis(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Word-wraps `text` into at most `max_lines` lines of `width` characters.
///
/// When the text does not fit, the last line ends with an ellipsis. Words
/// longer than a line are hard-split.
#[must_use]
pub fn wrap_with_ellipsis(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    'words: for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let current_len = char_len(&current);
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };

            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            } else {
                let rest = word.split_off(width);
                lines.push(word.iter().collect());
                word = rest;
            }

            if lines.len() == max_lines {
                overflow = true;
                break 'words;
            }
        }
    }

    if !overflow && !current.is_empty() {
        lines.push(current);
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            let mut kept: String = last.chars().take(width.saturating_sub(1)).collect();
            kept.push(ELLIPSIS);
            *last = kept;
        }
    }

    lines
}

/// Finds the characters of `text` matched by `query` and coalesces them into
/// `(start, end)` ranges with an exclusive end.
#[must_use]
pub fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Prints `text` with the given character ranges highlighted.
///
/// Selected cards skip match highlighting so the selection colors stay
/// intact. Ranges past the end of the text are clamped.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base_fg: &str, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            print!("{}", chars[current_pos..start].iter().collect::<String>());
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{}", chars[start..end].iter().collect::<String>());
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        print!("{}", chars[current_pos..].iter().collect::<String>());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_with_ellipsis("Memórias Póstumas", 9), "Memórias…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
        assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
    }

    #[test]
    fn short_text_wraps_to_one_line() {
        assert_eq!(wrap_with_ellipsis("um livro curto", 40, 2), vec!["um livro curto"]);
    }

    #[test]
    fn long_text_is_limited_to_max_lines_with_ellipsis() {
        let lines = wrap_with_ellipsis("aaa bbb ccc ddd eee fff", 7, 2);
        assert_eq!(lines, vec!["aaa bbb".to_string(), "ccc dd…".to_string()]);
    }

    #[test]
    fn exact_fit_has_no_ellipsis() {
        let lines = wrap_with_ellipsis("aaa bbb ccc", 7, 2);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn long_words_are_hard_split() {
        let lines = wrap_with_ellipsis("abcdefghij", 4, 3);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_text_wraps_to_nothing() {
        assert!(wrap_with_ellipsis("   ", 10, 2).is_empty());
        assert!(wrap_with_ellipsis("abc", 0, 2).is_empty());
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("Ulysses", "uly", &matcher), vec![(0, 3)]);
        assert!(compute_highlight_ranges("Ulysses", "zzz", &matcher).is_empty());
    }
}
