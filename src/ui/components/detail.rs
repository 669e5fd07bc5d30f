//! Detail panel component renderer.
//!
//! ```text
//! Max Verstappen
//! Red Bull • Dutch
//!
//! Performance index        87.25
//! Points • Wins • DNFs     437 • 9 • 1
//! Avg quali • grid • finish 2.1 • 2.4 • 2.9
//!
//! ROUND  QUALI  GRID  FINISH  STATUS          PTS
//! ```

use crate::ui::helpers::{fit, fit_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, RoundRow};

const LABEL_WIDTH: usize = 27;
const STATUS_WIDTH: usize = 16;

/// Renders the detail panel from `row` down to (excluding) `bottom`.
pub fn render_detail(row: usize, bottom: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    print!("{}", fit(&format!(" {}", detail.name), cols));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&format!(" {}", detail.subtitle), cols));
    print!("{}", Theme::reset());

    let stats = [
        ("Performance index", &detail.performance),
        ("Points • Wins • DNFs", &detail.totals),
        ("Avg quali • grid • finish", &detail.averages),
    ];
    for (offset, (label, value)) in stats.iter().enumerate() {
        position_cursor(row + 3 + offset, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!(" {}", fit(label, LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(value, cols.saturating_sub(LABEL_WIDTH + 1)));
        print!("{}", Theme::reset());
    }

    let table_row = row + 7;
    if table_row >= bottom {
        return;
    }

    position_cursor(table_row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    let headers = RoundRow {
        round: "ROUND".to_string(),
        quali: "QUALI".to_string(),
        grid: "GRID".to_string(),
        finish: "FINISH".to_string(),
        status: "STATUS".to_string(),
        points: "PTS".to_string(),
    };
    print!("{}", fit(&format_round(&headers), cols));
    print!("{}", Theme::reset());

    let body_top = table_row + 1;
    let capacity = bottom.saturating_sub(body_top);

    if detail.rounds.is_empty() {
        if capacity > 0 {
            position_cursor(body_top, 1);
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{}", fit(" No round results", cols));
            print!("{}", Theme::reset());
        }
        return;
    }

    let overflow = detail.rounds.len() > capacity;
    let shown = if overflow {
        capacity.saturating_sub(1)
    } else {
        detail.rounds.len()
    };

    for (offset, round) in detail.rounds.iter().take(shown).enumerate() {
        position_cursor(body_top + offset, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(&format_round(round), cols));
        print!("{}", Theme::reset());
    }

    if overflow && capacity > 0 {
        position_cursor(body_top + shown, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let hidden = detail.rounds.len() - shown;
        print!("{}", fit(&format!(" +{hidden} more rounds"), cols));
        print!("{}", Theme::reset());
    }
}

fn format_round(round: &RoundRow) -> String {
    format!(
        "{} {} {} {}  {} {}",
        fit_right(&round.round, 6),
        fit_right(&round.quali, 6),
        fit_right(&round.grid, 5),
        fit_right(&round.finish, 7),
        fit(&round.status, STATUS_WIDTH),
        fit_right(&round.points, 5)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_columns_line_up_with_headers() {
        let header = format_round(&RoundRow {
            round: "ROUND".to_string(),
            quali: "QUALI".to_string(),
            grid: "GRID".to_string(),
            finish: "FINISH".to_string(),
            status: "STATUS".to_string(),
            points: "PTS".to_string(),
        });
        let row = format_round(&RoundRow {
            round: "12".to_string(),
            quali: "—".to_string(),
            grid: "3".to_string(),
            finish: "1".to_string(),
            status: "+1 Lap".to_string(),
            points: "25".to_string(),
        });

        assert_eq!(header.chars().count(), row.chars().count());
        assert!(row.ends_with("   25"));
    }
}
