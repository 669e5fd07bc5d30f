//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. Every value is already formatted for display: absent
//! statistics are rendered as [`NOT_AVAILABLE`], numbers are strings, and the
//! table is already windowed to the pane height.

/// Placeholder shown for statistics the source does not provide.
pub const NOT_AVAILABLE: &str = "—";

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, season, update status).
    pub header: HeaderInfo,

    /// Search bar, shown while searching or while a query is applied.
    pub search_bar: Option<SearchBarInfo>,

    /// Error banner for the last failed fetch.
    pub error_banner: Option<ErrorBanner>,

    /// Visible window of leaderboard rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    /// Detail panel for the selected competitor; replaces the table when set.
    pub detail: Option<DetailView>,

    /// Footer information (keybindings).
    pub footer: FooterInfo,

    /// Message shown in place of table rows when there are none.
    pub empty_state: Option<EmptyState>,
}

/// One leaderboard row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub rank: String,
    /// `"{given} {family}"`.
    pub name: String,
    pub team: String,
    pub points: String,
    pub wins: String,
    pub avg_quali: String,
    pub avg_grid: String,
    pub avg_finish: String,
    pub performance: String,
    /// Performance index clamped to `0.0..=1.0` for the bar.
    pub performance_ratio: f64,
    pub dnfs: String,

    /// Whether the cursor is on this row.
    pub is_selected: bool,

    /// Character ranges of `name` matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title with the visible driver count.
    pub title: String,

    /// Season label, or the season being typed in season entry mode.
    pub season: String,

    /// `"Updated HH:MM:SS"` after a successful load, otherwise [`NOT_AVAILABLE`].
    pub updated: String,

    /// Whether a fetch is in flight.
    pub loading: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty table message.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No drivers for season 1950").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Number of drivers matching the query.
    pub match_count: usize,

    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}

/// Error banner display information.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    pub message: String,
}

/// Detail panel for one competitor.
#[derive(Debug, Clone)]
pub struct DetailView {
    /// `"{given} {family}"`.
    pub name: String,

    /// `"{team} • {nationality}"`.
    pub subtitle: String,

    pub performance: String,

    /// `"{points} • {wins} • {dnfs}"`.
    pub totals: String,

    /// `"{avg quali} • {avg grid} • {avg finish}"`.
    pub averages: String,

    /// Round-by-round results in round order.
    pub rounds: Vec<RoundRow>,
}

/// One row of the round-by-round table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    pub round: String,
    pub quali: String,
    pub grid: String,
    pub finish: String,
    pub status: String,
    pub points: String,
}
