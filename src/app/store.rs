//! Season data lifecycle.
//!
//! [`SeasonStore`] keeps one roster in sync with one season value. Every fetch
//! gets a fresh request id; a response is only applied when both its request id
//! and its season match what the store currently waits for, so out-of-order
//! responses for superseded seasons are dropped without any cancellation.

use crate::app::modes::FetchPhase;
use crate::client::{FetchContext, FetchOutcome};
use crate::domain::Competitor;
use chrono::{DateTime, Local};

/// Message shown for every kind of fetch failure.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load data. Ensure backend URL is configured.";

/// Owner of the season parameter and the roster fetched for it.
#[derive(Debug, Clone)]
pub struct SeasonStore {
    season: i32,
    phase: FetchPhase,
    roster: Vec<Competitor>,
    error: Option<String>,
    last_request_id: u64,
    pending_request: Option<u64>,
    updated_at: Option<DateTime<Local>>,
}

impl SeasonStore {
    /// Creates an idle store for `season` with an empty roster.
    #[must_use]
    pub const fn new(season: i32) -> Self {
        Self {
            season,
            phase: FetchPhase::Idle,
            roster: Vec::new(),
            error: None,
            last_request_id: 0,
            pending_request: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub const fn season(&self) -> i32 {
        self.season
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Roster of the last successful fetch. Kept while loading and after failures.
    #[must_use]
    pub fn roster(&self) -> &[Competitor] {
        &self.roster
    }

    /// User-facing error of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading)
    }

    /// Local time of the last successful fetch.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// Changes the season and starts a fetch for it.
    ///
    /// Returns the new request id, or `None` when `season` is already the
    /// current season (no change, nothing to fetch).
    pub fn set_season(&mut self, season: i32) -> Option<u64> {
        if season == self.season && self.phase != FetchPhase::Idle {
            tracing::debug!(season, "season unchanged, not refetching");
            return None;
        }

        tracing::debug!(from = self.season, to = season, "season changed");
        self.season = season;
        Some(self.begin_fetch())
    }

    /// Starts a new fetch for the current season, superseding any in flight.
    pub fn refresh(&mut self) -> u64 {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> u64 {
        self.last_request_id += 1;
        self.pending_request = Some(self.last_request_id);
        self.phase = FetchPhase::Loading;
        self.error = None;

        tracing::debug!(
            season = self.season,
            request_id = self.last_request_id,
            "season fetch started"
        );

        self.last_request_id
    }

    /// Returns whether a response with `context` answers the fetch in flight.
    #[must_use]
    pub fn is_current(&self, context: &FetchContext) -> bool {
        self.pending_request == Some(context.request_id) && context.season == self.season
    }

    /// Applies a fetch result.
    ///
    /// Returns `false` and leaves the store untouched when the response is
    /// stale. Otherwise transitions to `Ready` (roster replaced wholesale) or
    /// `Failed` (roster kept, generic error set) and returns `true`.
    pub fn complete(&mut self, context: &FetchContext, outcome: FetchOutcome) -> bool {
        if !self.is_current(context) {
            tracing::debug!(
                response_season = context.season,
                response_request_id = context.request_id,
                current_season = self.season,
                pending_request = ?self.pending_request,
                "discarding stale season response"
            );
            return false;
        }

        self.pending_request = None;

        match outcome {
            FetchOutcome::Loaded(drivers) => {
                tracing::debug!(
                    season = self.season,
                    driver_count = drivers.len(),
                    "season roster loaded"
                );
                self.roster = drivers;
                self.error = None;
                self.phase = FetchPhase::Ready;
                self.updated_at = Some(Local::now());
            }
            FetchOutcome::Failed { cause } => {
                tracing::warn!(season = self.season, cause = %cause, "season fetch failed");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.phase = FetchPhase::Failed;
            }
        }

        true
    }
}
