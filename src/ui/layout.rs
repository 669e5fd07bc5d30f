//! Vertical layout geometry shared by the renderer and mouse hit testing.
//!
//! Rows are 1-indexed, matching ANSI cursor positioning:
//!
//! ```text
//! 1          blank
//! 2          header
//! 3          border
//! 4..=6      search bar (optional)
//! next       error banner (optional)
//! next       table column headers
//! next..     table body
//! rows - 1   border
//! rows       footer
//! ```

/// Row of the header line.
pub const HEADER_ROW: usize = 2;

/// Height of the search bar box.
pub const SEARCH_BAR_HEIGHT: usize = 3;

/// First row of the table body.
#[must_use]
pub const fn table_body_top(search_visible: bool, banner_visible: bool) -> usize {
    let mut row = HEADER_ROW + 2;
    if search_visible {
        row += SEARCH_BAR_HEIGHT;
    }
    if banner_visible {
        row += 1;
    }
    row + 1
}

/// Number of body rows that fit above the bottom border.
#[must_use]
pub const fn table_capacity(rows: usize, search_visible: bool, banner_visible: bool) -> usize {
    rows.saturating_sub(1)
        .saturating_sub(table_body_top(search_visible, banner_visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_table_reserves_six_rows_of_chrome() {
        assert_eq!(table_body_top(false, false), 5);
        assert_eq!(table_capacity(24, false, false), 18);
    }

    #[test]
    fn test_search_bar_and_banner_push_body_down() {
        assert_eq!(table_body_top(true, false), 8);
        assert_eq!(table_body_top(true, true), 9);
        assert_eq!(table_capacity(24, true, true), 14);
    }

    #[test]
    fn test_tiny_pane_has_no_capacity() {
        assert_eq!(table_capacity(4, true, true), 0);
    }
}
