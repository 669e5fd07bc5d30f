//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a `Vec<Action>`
//! and the shim in `main.rs` executes them in order, which keeps every state
//! transition testable without a Zellij host.
//!
//! # Example
//!
//! ```
//! use pitwall::app::Action;
//! use pitwall::client::FetchRequest;
//!
//! let request = FetchRequest::new("/api/season/summary?season=2024".to_string(), 2024, 1);
//! let actions = vec![Action::FetchSeason(request)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::client::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a GET for a season summary.
    ///
    /// The request context must travel with the web request unchanged; it is
    /// what identifies the response when it comes back.
    FetchSeason(FetchRequest),
}
