//! Table component renderer.
//!
//! Renders the leaderboard as fixed-width columns. Widths are in characters,
//! and columns that no longer fit the pane are dropped from the right.

use crate::ui::helpers::{self, char_len, fit, fit_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const RANK_WIDTH: usize = 4;
const NAME_WIDTH: usize = 22;
const TEAM_WIDTH: usize = 18;
const STAT_WIDTH: usize = 7;
const BAR_WIDTH: usize = 10;

/// Statistic columns after the driver and team, in display order.
const STAT_HEADERS: [&str; 7] = ["PTS", "WINS", "AVG Q", "AVG G", "AVG F", "PERF", "DNF"];

/// Renders the column headers at `row` and returns the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let mut line = format!(
        "{} {} {}",
        fit_right("#", RANK_WIDTH),
        fit("DRIVER", NAME_WIDTH),
        fit("TEAM", TEAM_WIDTH)
    );
    for (i, header) in STAT_HEADERS.iter().enumerate() {
        line.push_str(&fit_right(header, STAT_WIDTH));
        if i == 5 {
            line.push(' ');
            line.push_str(&" ".repeat(BAR_WIDTH));
        }
    }

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one leaderboard row.
///
/// Styling precedence: cursor row colors, then search highlights, then normal
/// text. Placeholder statistics are dimmed outside the cursor row.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_style = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base_style}");

    let mut used = 0;
    let cell = |text: String, used: &mut usize| {
        let width = char_len(&text).min(cols.saturating_sub(*used));
        print!("{}", fit(&text, width));
        *used += width;
    };

    cell(format!("{} ", fit_right(&item.rank, RANK_WIDTH)), &mut used);

    if used + NAME_WIDTH <= cols {
        helpers::render_highlighted_text(
            &fit(&item.name, NAME_WIDTH),
            &item.highlight_ranges,
            theme,
            item.is_selected,
        );
        used += NAME_WIDTH;
    }

    cell(format!(" {}", fit(&item.team, TEAM_WIDTH)), &mut used);

    let stats = [
        &item.points,
        &item.wins,
        &item.avg_quali,
        &item.avg_grid,
        &item.avg_finish,
    ];
    for stat in stats {
        cell(fit_right(stat, STAT_WIDTH), &mut used);
    }

    cell(fit_right(&item.performance, STAT_WIDTH), &mut used);
    if used + BAR_WIDTH + 1 <= cols {
        print!(" ");
        render_performance_bar(item, theme, &base_style);
        used += BAR_WIDTH + 1;
    }

    cell(fit_right(&item.dnfs, STAT_WIDTH), &mut used);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

/// Number of filled cells for a performance ratio in `0.0..=1.0`.
fn filled_cells(ratio: f64) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    filled.min(BAR_WIDTH)
}

fn render_performance_bar(item: &DisplayItem, theme: &Theme, base_style: &str) {
    let filled = filled_cells(item.performance_ratio);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent));
    }
    print!("{}", "█".repeat(filled));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", "░".repeat(BAR_WIDTH - filled));
    print!("{base_style}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(0.0), 0);
        assert_eq!(filled_cells(0.8725), 9);
        assert_eq!(filled_cells(1.0), BAR_WIDTH);
        assert_eq!(filled_cells(3.0), BAR_WIDTH);
    }
}
