//! Application state management and view model computation.
//!
//! [`AppState`] composes the three moving parts of the plugin:
//!
//! - [`SeasonStore`]: season parameter, fetch lifecycle, roster
//! - [`filter_roster`]: the search-filtered view of the roster
//! - [`Selection`]: the competitor whose detail panel is open
//!
//! Derived state (`filtered`, cursor bounds) is recomputed explicitly through
//! [`AppState::recompute`] after every transition, so the view model is always
//! computed from a consistent snapshot.
//!
//! # Example
//!
//! ```
//! use pitwall::app::AppState;
//! use pitwall::client::Endpoint;
//! use pitwall::ui::Theme;
//!
//! let mut state = AppState::new(2024, Endpoint::default(), Theme::default());
//! let request = state.request_refresh();
//! assert_eq!(request.url, "/api/season/summary?season=2024");
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert!(viewmodel.header.loading);
//! ```

use super::filter::{filter_roster, highlight_range};
use super::modes::{FetchPhase, InputMode, SearchFocus};
use super::selection::Selection;
use super::store::SeasonStore;
use crate::client::{Endpoint, FetchContext, FetchOutcome, FetchRequest};
use crate::domain::{Competitor, RoundResult};
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailView, DisplayItem, EmptyState, ErrorBanner, FooterInfo, HeaderInfo, RoundRow,
    SearchBarInfo, UIViewModel, NOT_AVAILABLE,
};
use std::fmt::Display;

/// Longest season input accepted (sign plus the digits of `i32::MIN`).
const MAX_SEASON_INPUT_LEN: usize = 11;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Season parameter, fetch phase, and the last fetched roster.
    pub store: SeasonStore,

    /// Roster entries matching `search_query`, in source order.
    ///
    /// Recomputed by [`recompute`](Self::recompute) after state changes.
    pub filtered: Vec<Competitor>,

    /// Zero-based cursor position within `filtered`.
    pub cursor: usize,

    /// Competitor whose detail panel is open.
    pub selection: Selection,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Current search query string, as typed.
    pub search_query: String,

    /// Season year being typed in season entry mode.
    pub season_input: String,

    /// Where season summaries are fetched from.
    pub endpoint: Endpoint,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an idle state for `season`. No fetch is issued until
    /// [`request_refresh`](Self::request_refresh) or a season change.
    #[must_use]
    pub fn new(season: i32, endpoint: Endpoint, theme: Theme) -> Self {
        Self {
            store: SeasonStore::new(season),
            filtered: Vec::new(),
            cursor: 0,
            selection: Selection::default(),
            input_mode: InputMode::Normal,
            search_query: String::new(),
            season_input: String::new(),
            endpoint,
            theme,
        }
    }

    /// Moves the cursor down by one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.filtered.len();
    }

    /// Moves the cursor up by one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        if self.cursor == 0 {
            self.cursor = self.filtered.len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Competitor under the cursor, if any.
    #[must_use]
    pub fn cursor_competitor(&self) -> Option<&Competitor> {
        self.filtered.get(self.cursor)
    }

    /// Whether the search bar takes part in the layout.
    #[must_use]
    pub fn search_visible(&self) -> bool {
        matches!(self.input_mode, InputMode::Search(_)) || !self.search_query.is_empty()
    }

    /// Recomputes the filtered roster and clamps the cursor.
    pub fn recompute(&mut self) {
        let _span = tracing::debug_span!(
            "recompute",
            roster_len = self.store.roster().len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.filtered = filter_roster(self.store.roster(), &self.search_query)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.filtered.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered.len(), "roster filter applied");
    }

    /// Switches to `season` and returns the fetch to issue.
    ///
    /// Any open detail view is closed immediately, before the new data arrives.
    /// Returns `None` when `season` is already current.
    pub fn request_season(&mut self, season: i32) -> Option<FetchRequest> {
        let request_id = self.store.set_season(season)?;
        self.selection.clear();
        self.recompute();
        Some(FetchRequest::new(
            self.endpoint.season_summary_url(season),
            season,
            request_id,
        ))
    }

    /// Starts a fetch for the current season and returns it.
    ///
    /// Used for the initial load and for explicit refreshes.
    pub fn request_refresh(&mut self) -> FetchRequest {
        let request_id = self.store.refresh();
        let season = self.store.season();
        self.selection.clear();
        self.recompute();
        FetchRequest::new(self.endpoint.season_summary_url(season), season, request_id)
    }

    /// Applies a fetch result. Returns `false` if it was stale and ignored.
    pub fn complete_fetch(&mut self, context: &FetchContext, outcome: FetchOutcome) -> bool {
        let replaces_roster = matches!(outcome, FetchOutcome::Loaded(_));

        if !self.store.complete(context, outcome) {
            return false;
        }

        self.selection.clear();
        if replaces_roster {
            self.cursor = 0;
        }
        self.recompute();
        true
    }

    /// Opens the detail panel for the competitor under the cursor.
    ///
    /// Returns `false` when there is no row to open.
    pub fn open_detail(&mut self) -> bool {
        let Some(competitor) = self.cursor_competitor().cloned() else {
            return false;
        };
        self.selection.select(competitor);
        true
    }

    /// Appends a character to the season being typed.
    ///
    /// Only digits and a leading `-` are accepted. Returns whether the input changed.
    pub fn push_season_char(&mut self, c: char) -> bool {
        let accepted = c.is_ascii_digit() || (c == '-' && self.season_input.is_empty());
        if !accepted || self.season_input.len() >= MAX_SEASON_INPUT_LEN {
            return false;
        }
        self.season_input.push(c);
        true
    }

    /// Maps a mouse click on pane line `line` (0-based) to a row of `filtered`.
    ///
    /// Uses the same window computation as the renderer so that the clicked
    /// row is the one drawn at that line.
    #[must_use]
    pub fn row_at(&self, line: usize, rows: usize) -> Option<usize> {
        let search_visible = self.search_visible();
        let banner_visible = self.store.error().is_some();

        let top = layout::table_body_top(search_visible, banner_visible);
        let offset = (line + 1).checked_sub(top)?;
        let capacity = layout::table_capacity(rows, search_visible, banner_visible);
        if offset >= capacity {
            return None;
        }

        let (start, end) = self.visible_window(capacity);
        let index = start + offset;
        (index < end).then_some(index)
    }

    /// Range of `filtered` visible in a table of `capacity` rows.
    ///
    /// A roster that fits is shown whole. Otherwise the cursor is centered
    /// where possible and the window stays full near the end of the list.
    fn visible_window(&self, capacity: usize) -> (usize, usize) {
        let len = self.filtered.len();
        if len <= capacity {
            return (0, len);
        }

        let start = self.cursor.saturating_sub(capacity / 2).min(len - capacity);
        (start, start + capacity)
    }

    /// Computes a renderable UI view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        if let Some(competitor) = self.selection.selected() {
            return UIViewModel {
                header,
                search_bar: None,
                error_banner: None,
                display_items: vec![],
                selected_index: 0,
                detail: Some(Self::compute_detail(competitor)),
                footer,
                empty_state: None,
            };
        }

        let search_bar = self.compute_search_bar();
        let error_banner = self.store.error().map(|message| ErrorBanner {
            message: message.to_string(),
        });

        let capacity = layout::table_capacity(rows, search_bar.is_some(), error_banner.is_some());
        let (start, end) = self.visible_window(capacity);

        let display_items = self.filtered[start..end]
            .iter()
            .enumerate()
            .map(|(offset, competitor)| self.compute_display_item(competitor, start + offset))
            .collect();

        tracing::trace!(rows, cols, start, end, "viewmodel window computed");

        UIViewModel {
            header,
            search_bar,
            error_banner,
            display_items,
            selected_index: self.cursor.saturating_sub(start),
            detail: None,
            footer,
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_display_item(&self, competitor: &Competitor, absolute_idx: usize) -> DisplayItem {
        let name = competitor.full_name();
        let highlight_ranges = highlight_range(&name, &self.search_query)
            .into_iter()
            .collect();

        DisplayItem {
            rank: competitor.rank.to_string(),
            name,
            team: competitor.team_name().to_string(),
            points: format_number(competitor.points),
            wins: competitor.wins.to_string(),
            avg_quali: format_optional(competitor.avg_quali.map(format_number)),
            avg_grid: format_optional(competitor.avg_grid.map(format_number)),
            avg_finish: format_optional(competitor.avg_finish.map(format_number)),
            performance: format_number(competitor.performance_index),
            performance_ratio: (competitor.performance_index / 100.0).clamp(0.0, 1.0),
            dnfs: competitor.dnfs.to_string(),
            is_selected: absolute_idx == self.cursor,
            highlight_ranges,
        }
    }

    fn compute_detail(competitor: &Competitor) -> DetailView {
        let subtitle = format!(
            "{} • {}",
            competitor.team.as_deref().unwrap_or(NOT_AVAILABLE),
            competitor.nationality.as_deref().unwrap_or(NOT_AVAILABLE)
        );

        DetailView {
            name: competitor.full_name(),
            subtitle,
            performance: format_number(competitor.performance_index),
            totals: format!(
                "{} • {} • {}",
                format_number(competitor.points),
                competitor.wins,
                competitor.dnfs
            ),
            averages: format!(
                "{} • {} • {}",
                format_optional(competitor.avg_quali.map(format_number)),
                format_optional(competitor.avg_grid.map(format_number)),
                format_optional(competitor.avg_finish.map(format_number))
            ),
            rounds: competitor
                .rounds_in_order()
                .into_iter()
                .map(Self::compute_round_row)
                .collect(),
        }
    }

    fn compute_round_row(result: &RoundResult) -> RoundRow {
        RoundRow {
            round: result.round.to_string(),
            quali: format_optional(result.quali),
            grid: format_optional(result.grid),
            finish: format_optional(result.position),
            status: format_optional(result.status.as_deref()),
            points: format_number(result.points),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let season = if self.input_mode == InputMode::SeasonEntry {
            format!("Season: {}_", self.season_input)
        } else {
            format!("Season {}", self.store.season())
        };

        let updated = self.store.updated_at().map_or_else(
            || NOT_AVAILABLE.to_string(),
            |at| format!("Updated {}", at.format("%H:%M:%S")),
        );

        HeaderInfo {
            title: format!(" Driver Standings ({}) ", self.filtered.len()),
            season,
            updated,
            loading: self.store.is_loading(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selection.is_open() {
            "Esc/q: close  [/]: change season  r: refresh"
        } else {
            match self.input_mode {
                InputMode::SeasonEntry => "Type a year  Enter: load season  Esc: cancel",
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: exit search  Enter: details  Ctrl+n/p: navigate  Type to filter"
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: clear search  /: edit query  j/k: navigate  Enter: details"
                }
                InputMode::Normal => {
                    "j/k: navigate  Enter: details  /: search  [/]: season  s: set season  r: refresh  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.search_visible().then(|| SearchBarInfo {
            query: self.search_query.clone(),
            match_count: self.filtered.len(),
            is_typing: self.input_mode == InputMode::Search(SearchFocus::Typing),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered.is_empty() {
            return None;
        }

        let season = self.store.season();
        let (message, subtitle) = if !self.store.roster().is_empty() {
            (
                format!("No drivers match \"{}\"", self.search_query.trim()),
                "Backspace to edit or Esc to clear the search".to_string(),
            )
        } else {
            match self.store.phase() {
                FetchPhase::Idle => (
                    "Waiting for web access".to_string(),
                    "Grant the permission request to load standings".to_string(),
                ),
                FetchPhase::Loading => (
                    "Fetching data…".to_string(),
                    format!("Loading season {season}"),
                ),
                FetchPhase::Ready => (
                    format!("No drivers for season {season}"),
                    "Press [ or ] to change the season".to_string(),
                ),
                FetchPhase::Failed => (
                    "No data loaded".to_string(),
                    "Press r to retry or change the season".to_string(),
                ),
            }
        };

        Some(EmptyState { message, subtitle })
    }
}

/// Formats a statistic with at most two decimals, dropping trailing zeros.
fn format_number(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_optional<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
