//! Error banner component renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorBanner;

/// Renders the one-line error banner at `row` and returns the next row.
pub fn render_error_banner(row: usize, banner: &ErrorBanner, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", fit(&format!(" ✖ {}", banner.message), cols));
    print!("{}", Theme::reset());
    row + 1
}
