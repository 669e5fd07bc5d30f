//! Pitwall: a Zellij plugin showing a season driver leaderboard.
//!
//! Pitwall fetches a season summary from a backend and provides:
//! - A ranked driver table with points, wins, averages, and a performance index
//! - Case-insensitive search over driver name and team
//! - A detail panel with round-by-round results for one driver
//! - Season switching, with late responses for superseded seasons discarded

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Season store and fetch lifecycle                 │
//! │  - Roster filter and detail selection               │
//! │  - Event handling, view model computation           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Client Layer  │
//! │ (ui/)         │                     │ (client/)     │
//! │ - Rendering   │                     │ - Endpoint    │
//! │ - Theming     │                     │ - Context map │
//! │ - Components  │                     │ - Decoding    │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Competitor model (domain/competitor)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/pitwall.wasm" {
//!         backend_url "http://localhost:8000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use pitwall::client::{FetchOutcome, Endpoint};
//! use pitwall::{handle_event, Action, AppState, Event, Theme};
//!
//! let mut state = AppState::new(2024, Endpoint::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! let Action::FetchSeason(request) = &actions[0] else { unreachable!() };
//!
//! let completed = Event::FetchCompleted {
//!     context: request.context.clone(),
//!     outcome: FetchOutcome::Loaded(vec![]),
//! };
//! handle_event(&mut state, &completed)?;
//! assert!(state.compute_viewmodel(24, 80).empty_state.is_some());
//! # Ok::<(), pitwall::PitwallError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, FetchPhase, InputMode, SearchFocus};
pub use domain::{Competitor, PitwallError, Result};
pub use ui::Theme;

use chrono::Datelike;
use client::Endpoint;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the season summary backend, e.g. `http://localhost:8000`.
    ///
    /// When unset, requests use the bare path `/api/season/summary`.
    pub backend_url: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Reads the plugin options `backend_url`, `theme`, `theme_file`, and
    /// `trace_level`. Blank values count as unset.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use pitwall::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("backend_url".to_string(), "http://localhost:8000".to_string());
    /// map.insert("theme".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_url.as_deref(), Some("http://localhost:8000"));
    /// assert_eq!(config.theme_name, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let option = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            backend_url: option("backend_url"),
            theme_name: option("theme"),
            theme_file: option("theme_file"),
            trace_level: option("trace_level"),
        }
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// Failures fall back to the default theme and are logged.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the application state for the current calendar year (UTC).
///
/// No fetch is issued here; the plugin starts loading once web access is
/// granted.
pub fn initialize(config: &Config) -> AppState {
    let season = chrono::Utc::now().year();
    tracing::debug!(season, backend_url = ?config.backend_url, "initializing pitwall plugin");

    AppState::new(
        season,
        Endpoint::new(config.backend_url.clone()),
        config.load_theme(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn test_theme_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_bytes!("../themes/catppuccin-latte.toml"))
            .unwrap();

        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn test_initialize_targets_current_year() {
        let mut map = BTreeMap::new();
        map.insert("backend_url".to_string(), "http://api.local/".to_string());

        let state = initialize(&Config::from_zellij(&map));
        assert_eq!(state.store.season(), chrono::Utc::now().year());
        assert_eq!(state.store.phase(), FetchPhase::Idle);
        assert_eq!(state.endpoint.base_url(), Some("http://api.local"));
    }
}
