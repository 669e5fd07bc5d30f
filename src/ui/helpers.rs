//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across components: cursor positioning, fixed-width
//! cells, and search match highlighting. Widths are measured in characters so
//! accented driver names (e.g., "Sergio Pérez") keep columns aligned.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncates or right-pads `text` to exactly `width` characters.
///
/// Truncated text ends with `…`.
///
/// # Example
///
/// ```
/// use pitwall::ui::helpers::fit;
///
/// assert_eq!(fit("Norris", 8), "Norris  ");
/// assert_eq!(fit("Verstappen", 6), "Verst…");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

/// Right-aligns `text` in a cell of `width` characters, truncating if needed.
#[must_use]
pub fn fit_right(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len >= width {
        return fit(text, width);
    }
    format!("{}{text}", " ".repeat(width - len))
}

/// Renders `text` with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting is
/// skipped on the selected row, where selection colors take precedence.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates_by_chars() {
        assert_eq!(fit("Pérez", 7), "Pérez  ");
        assert_eq!(char_len(&fit("Sergio Pérez", 8)), 8);
        assert_eq!(fit("Sergio Pérez", 8), "Sergio …");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_fit_right_aligns() {
        assert_eq!(fit_right("25", 5), "   25");
        assert_eq!(fit_right("—", 3), "  —");
        assert_eq!(fit_right("12345", 3), "12…");
    }
}
