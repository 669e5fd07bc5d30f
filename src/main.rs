//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Pitwall library and the Zellij plugin
//! system: it maps Zellij events to library events, runs them through
//! `handle_event`, and executes the returned actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Permission granted**: `Event::Start` loads the current season
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `WebRequestResult` → `Event::FetchCompleted` (matched by its context map)
//! - `Mouse(LeftClick)` → `Event::Click`
//! - `Mouse(ScrollDown/ScrollUp)` → `Event::KeyDown/KeyUp`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Open driver details
//! - `/`: Search
//! - `[`/`h`/`Left`, `]`/`l`/`Right`: Previous/next season
//! - `s`: Type a season
//! - `r`: Refresh
//! - `q`: Close plugin
//!
//! With the detail panel open:
//! - `Esc`/`q`/`Enter`/`Backspace`: Close details
//! - Season keys and `r` work as in normal mode
//!
//! In search mode:
//! - Typing edits the query, `Enter` opens details, `Esc` clears the search
//! - After opening details, `/` returns to the query

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use pitwall::client::{parse_season_summary, FetchContext, FetchOutcome};
use pitwall::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: pitwall::AppState,

    /// Pane height at the last render, for mouse hit testing.
    rows: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: pitwall::initialize(&Config::default()),
            rows: 0,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests permissions, and
    /// subscribes to events. The first fetch waits for the permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = pitwall::observability::init_tracing(&config) {
            eprintln!("pitwall: tracing disabled: {e}");
        }

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(backend_url = ?config.backend_url, theme = ?config.theme_name, "parsed configuration");
        self.app = pitwall::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event and returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name)
            .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match self.map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading season");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - season data cannot be fetched");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        pitwall::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::SeasonEntry => Self::map_season_entry_key(key),
            InputMode::Search(SearchFocus::Typing) => Self::map_search_typing_key(key),
            InputMode::Search(SearchFocus::Navigating) | InputMode::Normal
                if self.app.selection.is_open() =>
            {
                Self::map_detail_key(key)
            }
            InputMode::Search(SearchFocus::Navigating) | InputMode::Normal => {
                self.map_table_key(key)
            }
        }
    }

    fn map_season_entry_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::CommitSeason,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_search_typing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
        Self::map_season_key(key).or_else(|| match key.bare_key {
            BareKey::Esc | BareKey::Enter | BareKey::Backspace | BareKey::Char('q') => {
                Some(Event::CloseDetail)
            }
            _ => None,
        })
    }

    fn map_table_key(&self, key: &KeyWithModifier) -> Option<Event> {
        Self::map_season_key(key).or_else(|| {
            Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Esc => Event::Escape,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char('/') => match self.app.input_mode {
                    InputMode::Normal => Event::SearchMode,
                    _ => Event::FocusSearchBar,
                },
                _ => return None,
            })
        })
    }

    /// Season switching keys, shared by the table and the detail panel.
    fn map_season_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Left | BareKey::Char('[' | 'h') => Event::PreviousSeason,
            BareKey::Right | BareKey::Char(']' | 'l') => Event::NextSeason,
            BareKey::Char('s') => Event::SeasonEntryMode,
            BareKey::Char('r') => Event::Refresh,
            _ => return None,
        })
    }

    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, _col) => Some(Event::Click {
                line: usize::try_from(line).ok()?,
                rows: self.rows,
            }),
            Mouse::ScrollDown(_) => Some(Event::KeyDown),
            Mouse::ScrollUp(_) => Some(Event::KeyUp),
            _ => None,
        }
    }

    /// Maps a finished web request to a fetch completion.
    ///
    /// Results whose context is not a season fetch are ignored.
    fn map_web_request_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let context = match FetchContext::from_map(context) {
            Ok(context) => context,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring web request result without season context");
                return None;
            }
        };

        tracing::debug!(
            status,
            body_len = body.len(),
            season = context.season,
            request_id = context.request_id,
            "season response received"
        );

        let outcome = FetchOutcome::from(parse_season_summary(status, body));
        Some(Event::FetchCompleted { context, outcome })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchSeason(request) => {
                tracing::debug!(url = %request.url, season = request.context.season, "issuing season request");

                let mut headers = BTreeMap::new();
                headers.insert("Accept".to_string(), "application/json".to_string());

                web_request(
                    &request.url,
                    HttpVerb::Get,
                    headers,
                    vec![],
                    request.context.to_map(),
                );
            }
        }
    }
}
