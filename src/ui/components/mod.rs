//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Season, title with driver count, update badge
//! - [`search`]: Search input box with match count
//! - [`banner`]: Fetch error banner
//! - [`table`]: Leaderboard columns and rows
//! - [`empty`]: Message shown in place of rows
//! - [`detail`]: Selected driver panel with round-by-round results
//! - [`footer`]: Keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_leaderboard_mode`]: Header + optional `SearchBar` + optional banner + Table + Footer
//! - [`render_detail_mode`]: Header + Detail panel + Footer

mod banner;
mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, UIViewModel};

use banner::render_error_banner;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders the leaderboard layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, optional]
/// [Error banner, optional]
/// [Table Headers]
/// [Table Rows or empty state]
/// [Border]
/// [Footer]
/// ```
///
/// Row positions follow [`layout`] so mouse hit testing agrees with what is drawn.
pub fn render_leaderboard_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if let Some(banner) = &vm.error_banner {
        current_row = render_error_banner(current_row, banner, theme, cols);
    }
    current_row = render_table_headers(current_row, theme, cols);

    debug_assert_eq!(
        current_row,
        layout::table_body_top(vm.search_bar.is_some(), vm.error_banner.is_some())
    );

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}

/// Renders the detail layout for the selected competitor.
pub fn render_detail_mode(
    vm: &UIViewModel,
    detail: &DetailView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    render_detail(current_row + 1, rows.saturating_sub(1), detail, theme, cols);

    render_bottom(vm, theme, cols, rows);
}
