//! Header component renderer.
//!
//! Renders the title bar: season on the left, centered title with the driver
//! count, and the update badge or loading indicator on the right.

use crate::ui::helpers::{char_len, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const LOADING_LABEL: &str = "Loading…";

/// Renders the header at `row` and returns the next row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let left = format!(" {}", header.season);
    let right = if header.loading {
        format!("{LOADING_LABEL} ")
    } else {
        format!("{} ", header.updated)
    };

    let left_len = char_len(&left);
    let right_len = char_len(&right);
    let title_len = char_len(&header.title);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    if left_len + title_len + right_len > cols {
        print!("{}", Theme::bold());
        print!("{}", fit(&header.title, cols));
        print!("{}", Theme::reset());
        return row + 1;
    }

    let title_start = (cols.saturating_sub(title_len) / 2).max(left_len);
    let gap_before = title_start - left_len;
    let gap_after = cols.saturating_sub(title_start + title_len + right_len);

    print!("{left}");
    print!("{}", " ".repeat(gap_before));
    print!("{}{}", Theme::bold(), header.title);
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(gap_after));

    if header.loading {
        print!("{}", Theme::fg(&theme.colors.accent));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{right}");
    print!("{}", Theme::reset());
    row + 1
}
