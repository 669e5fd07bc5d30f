//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! fetch completions, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, mouse, web request results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods, followed by a recompute
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Click`
//! - **Master/detail**: `OpenDetail`, `CloseDetail`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `Char`, `Backspace`, `Escape`
//! - **Season**: `PreviousSeason`, `NextSeason`, `SeasonEntryMode`, `CommitSeason`, `SetSeason`, `Refresh`
//! - **Lifecycle**: `Start`, `FetchCompleted`
//!
//! # Example
//!
//! ```
//! use pitwall::app::{handle_event, Action, AppState, Event};
//! use pitwall::client::Endpoint;
//! use pitwall::ui::Theme;
//!
//! let mut state = AppState::new(2024, Endpoint::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(should_render);
//! assert!(matches!(actions[0], Action::FetchSeason(_)));
//! # Ok::<(), pitwall::domain::PitwallError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::client::{FetchContext, FetchOutcome, TraceContext};
use crate::domain::error::Result;

/// Events triggered by user input or by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Web access is available; loads the initial season.
    Start,

    /// Moves the cursor down by one row (wraps to top).
    KeyDown,
    /// Moves the cursor up by one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens the detail panel for the row under the cursor.
    OpenDetail,
    /// Closes the detail panel.
    CloseDetail,

    /// Left click on a pane line.
    Click {
        /// Zero-based pane line.
        line: usize,
        /// Pane height, needed to reproduce the rendered window.
        rows: usize,
    },

    /// Enters search mode with an empty query.
    SearchMode,
    /// Returns focus to the search input while keeping the query.
    FocusSearchBar,
    /// Types a character into the active input (search query or season).
    Char(char),
    /// Removes the last character from the active input.
    Backspace,
    /// Cancels the active input mode, or closes the detail panel.
    Escape,

    /// Switches to the previous season.
    PreviousSeason,
    /// Switches to the next season.
    NextSeason,
    /// Starts typing a season year.
    SeasonEntryMode,
    /// Loads the season typed in season entry mode.
    CommitSeason,
    /// Switches to the given season.
    SetSeason(i32),
    /// Refetches the current season.
    Refresh,

    /// A season fetch finished.
    FetchCompleted {
        /// Context echoed back with the response.
        context: FetchContext,
        /// What the response decoded to.
        outcome: FetchOutcome,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI must be re-rendered, and the actions to execute in
/// order.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` keeps the
/// signature stable for the plugin shim.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _guard = match event {
        Event::FetchCompleted { context, .. } => {
            context.trace_context.as_ref().and_then(TraceContext::attach)
        }
        _ => None,
    };

    let _span = match event {
        Event::FetchCompleted { context, .. } => tracing::debug_span!(
            "handle_event",
            event_type = "FetchCompleted",
            season = context.season,
            request_id = context.request_id
        ),
        _ => tracing::debug_span!("handle_event", event_type = ?event),
    }
    .entered();

    match event {
        Event::Start | Event::Refresh => {
            let request = state.request_refresh();
            Ok((true, vec![Action::FetchSeason(request)]))
        }
        Event::KeyDown => {
            if state.selection.is_open() {
                return Ok((false, vec![]));
            }
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.selection.is_open() {
                return Ok((false, vec![]));
            }
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenDetail => {
            if state.input_mode == InputMode::Search(SearchFocus::Typing) {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }

            if !state.open_detail() {
                tracing::debug!("no competitor under cursor");
            }
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let was_open = state.selection.is_open();
            state.selection.clear();
            Ok((was_open, vec![]))
        }
        Event::Click { line, rows } => {
            if state.selection.is_open() {
                state.selection.clear();
                return Ok((true, vec![]));
            }

            let Some(index) = state.row_at(*line, *rows) else {
                tracing::trace!(line, "click outside table rows");
                return Ok((false, vec![]));
            };

            if state.input_mode == InputMode::Search(SearchFocus::Typing) {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }

            state.cursor = index;
            state.open_detail();
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            state.recompute();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                state.recompute();
                Ok((true, vec![]))
            }
            InputMode::SeasonEntry => Ok((state.push_season_char(*c), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_query.pop();
                state.recompute();
                Ok((true, vec![]))
            }
            InputMode::SeasonEntry => Ok((state.season_input.pop().is_some(), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::Escape => match state.input_mode {
            InputMode::SeasonEntry => {
                tracing::debug!("season entry cancelled");
                state.input_mode = InputMode::Normal;
                state.season_input.clear();
                Ok((true, vec![]))
            }
            InputMode::Search(_) => {
                tracing::debug!(query = %state.search_query, "exiting search mode");
                state.input_mode = InputMode::Normal;
                state.search_query = String::new();
                state.recompute();
                Ok((true, vec![]))
            }
            InputMode::Normal => {
                let was_open = state.selection.is_open();
                state.selection.clear();
                Ok((was_open, vec![]))
            }
        },
        Event::PreviousSeason => {
            let season = state.store.season().saturating_sub(1);
            Ok(change_season(state, season))
        }
        Event::NextSeason => {
            let season = state.store.season().saturating_add(1);
            Ok(change_season(state, season))
        }
        Event::SeasonEntryMode => {
            state.selection.clear();
            state.input_mode = InputMode::SeasonEntry;
            state.season_input.clear();
            Ok((true, vec![]))
        }
        Event::CommitSeason => {
            let input = std::mem::take(&mut state.season_input);
            state.input_mode = InputMode::Normal;

            match input.parse::<i32>() {
                Ok(season) => Ok(change_season(state, season)),
                Err(e) => {
                    tracing::debug!(input = %input, error = %e, "ignoring invalid season input");
                    Ok((true, vec![]))
                }
            }
        }
        Event::SetSeason(season) => Ok(change_season(state, *season)),
        Event::FetchCompleted { context, outcome } => {
            let applied = state.complete_fetch(context, outcome.clone());
            Ok((applied, vec![]))
        }
    }
}

fn change_season(state: &mut AppState, season: i32) -> (bool, Vec<Action>) {
    match state.request_season(season) {
        Some(request) => (true, vec![Action::FetchSeason(request)]),
        None => (true, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Endpoint;
    use crate::domain::Competitor;
    use crate::ui::Theme;

    fn driver(id: &str, given: &str, family: &str, team: &str) -> Competitor {
        serde_json::from_value(serde_json::json!({
            "driverId": id,
            "givenName": given,
            "familyName": family,
            "constructor": team,
            "rank": 1,
            "points": 10,
            "wins": 0,
            "dnfs": 0,
            "performance_index": 50
        }))
        .unwrap()
    }

    fn roster() -> Vec<Competitor> {
        vec![
            driver("max_verstappen", "Max", "Verstappen", "Red Bull"),
            driver("norris", "Lando", "Norris", "McLaren"),
            driver("perez", "Sergio", "Pérez", "Red Bull"),
        ]
    }

    fn fetch_request(actions: &[Action]) -> crate::client::FetchRequest {
        match actions {
            [Action::FetchSeason(request)] => request.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn started_state() -> AppState {
        let mut state = AppState::new(2024, Endpoint::new(Some("http://localhost:8000".to_string())), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        let request = fetch_request(&actions);
        handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: request.context,
                outcome: FetchOutcome::Loaded(roster()),
            },
        )
        .unwrap();
        state
    }

    fn type_query(state: &mut AppState, query: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn test_start_fetches_current_season() {
        let mut state = AppState::new(2024, Endpoint::new(Some("http://localhost:8000".to_string())), Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Start).unwrap();

        assert!(render);
        let request = fetch_request(&actions);
        assert_eq!(request.url, "http://localhost:8000/api/season/summary?season=2024");
        assert_eq!(request.context.season, 2024);
        assert!(state.store.is_loading());
    }

    #[test]
    fn test_search_filters_by_name_or_team() {
        let mut state = started_state();
        type_query(&mut state, "red");

        let ids: Vec<&str> = state.filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["max_verstappen", "perez"]);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn test_escape_clears_search() {
        let mut state = started_state();
        type_query(&mut state, "zzz");
        assert!(state.filtered.is_empty());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_query.is_empty());
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn test_open_detail_from_search_keeps_query() {
        let mut state = started_state();
        type_query(&mut state, "norris");

        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
        assert_eq!(state.selection.selected().unwrap().id, "norris");
        assert_eq!(state.search_query, "norris");

        handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert!(!state.selection.is_open());
    }

    #[test]
    fn test_season_change_clears_selection_before_data_arrives() {
        let mut state = started_state();
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(state.selection.is_open());

        let (_, actions) = handle_event(&mut state, &Event::NextSeason).unwrap();
        let request = fetch_request(&actions);
        assert_eq!(request.context.season, 2025);
        assert!(!state.selection.is_open());
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = started_state();

        let (_, actions) = handle_event(&mut state, &Event::SetSeason(2022)).unwrap();
        let older = fetch_request(&actions);
        let (_, actions) = handle_event(&mut state, &Event::SetSeason(2023)).unwrap();
        let newer = fetch_request(&actions);

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: newer.context,
                outcome: FetchOutcome::Loaded(vec![driver("hamilton", "Lewis", "Hamilton", "Mercedes")]),
            },
        )
        .unwrap();
        assert!(render);

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: older.context,
                outcome: FetchOutcome::Loaded(roster()),
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.store.season(), 2023);
        assert_eq!(state.filtered[0].id, "hamilton");
    }

    #[test]
    fn test_same_season_is_not_refetched() {
        let mut state = started_state();
        let (_, actions) = handle_event(&mut state, &Event::SetSeason(2024)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_season_entry_commits_typed_year() {
        let mut state = started_state();
        handle_event(&mut state, &Event::SeasonEntryMode).unwrap();
        for c in "1950".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.filtered.len(), 3);

        let (_, actions) = handle_event(&mut state, &Event::CommitSeason).unwrap();
        assert_eq!(fetch_request(&actions).context.season, 1950);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.season_input.is_empty());
    }

    #[test]
    fn test_season_entry_escape_keeps_season() {
        let mut state = started_state();
        handle_event(&mut state, &Event::SeasonEntryMode).unwrap();
        handle_event(&mut state, &Event::Char('1')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.store.season(), 2024);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_invalid_season_input_is_dropped() {
        let mut state = started_state();
        handle_event(&mut state, &Event::SeasonEntryMode).unwrap();
        handle_event(&mut state, &Event::Char('-')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::CommitSeason).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.store.season(), 2024);
    }

    #[test]
    fn test_click_opens_row_and_second_click_closes() {
        let mut state = started_state();

        handle_event(&mut state, &Event::Click { line: 5, rows: 24 }).unwrap();
        assert_eq!(state.selection.selected().unwrap().id, "norris");

        handle_event(&mut state, &Event::Click { line: 5, rows: 24 }).unwrap();
        assert!(!state.selection.is_open());

        let (render, _) = handle_event(&mut state, &Event::Click { line: 1, rows: 24 }).unwrap();
        assert!(!render);
    }

    #[test]
    fn test_click_while_typing_moves_focus_to_table() {
        let mut state = started_state();
        type_query(&mut state, "red");

        handle_event(&mut state, &Event::Click { line: 7, rows: 24 }).unwrap();
        assert_eq!(state.selection.selected().unwrap().id, "max_verstappen");
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
        assert_eq!(state.search_query, "red");
    }

    #[test]
    fn test_failed_completion_closes_detail_opened_while_loading() {
        let mut state = started_state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request = fetch_request(&actions);

        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(state.selection.is_open());

        handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: request.context,
                outcome: FetchOutcome::Failed {
                    cause: "HTTP error: unexpected status 500".to_string(),
                },
            },
        )
        .unwrap();

        assert!(!state.selection.is_open());
        assert_eq!(state.filtered.len(), 3);
    }

    #[test]
    fn test_failed_refresh_keeps_roster() {
        let mut state = started_state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request = fetch_request(&actions);

        handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: request.context,
                outcome: FetchOutcome::Failed {
                    cause: "HTTP error: unexpected status 503".to_string(),
                },
            },
        )
        .unwrap();

        assert_eq!(state.filtered.len(), 3);
        assert!(state.store.error().is_some());
        let vm = state.compute_viewmodel(24, 120);
        assert!(vm.error_banner.is_some());
    }

    #[test]
    fn test_close_focus_emits_action() {
        let mut state = started_state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
