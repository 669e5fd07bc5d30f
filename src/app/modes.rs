//! Input mode and fetch phase state types.
//!
//! # State Machines
//!
//! Input modes decide how keystrokes are interpreted:
//! - **Normal**: table navigation and commands
//! - **Search**: editing or navigating the driver search
//! - **`SeasonEntry`**: typing a season year
//!
//! The fetch phase tracks the season data lifecycle:
//!
//! ```text
//! Idle ──season change──▶ Loading ──success──▶ Ready
//!                            │   ◀──season change──┘
//!                            └──failure──▶ Failed ──season change──▶ Loading
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    Typing,

    /// User is moving through the filtered rows with the query kept.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), Enter (details), / (search),
    /// [ and ] (previous/next season), s (type season), r (refresh), q (quit).
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// Typing a season year; Enter commits, Esc cancels.
    SeasonEntry,
}

/// Lifecycle phase of the season data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch for the current season is in flight.
    Loading,
    /// The last fetch for the current season succeeded.
    Ready,
    /// The last fetch for the current season failed.
    Failed,
}
