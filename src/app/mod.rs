//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain and
//! client layers. It implements the event-driven core that powers the
//! leaderboard UI.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Web Request Results ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Case-insensitive roster search
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode and fetch phase types
//! - [`selection`]: Single-slot detail selection
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Season parameter and fetch lifecycle

pub mod actions;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;
pub mod store;

pub use actions::Action;
pub use filter::filter_roster;
pub use handler::{handle_event, Event};
pub use modes::{FetchPhase, InputMode, SearchFocus};
pub use selection::Selection;
pub use state::AppState;
pub use store::{SeasonStore, LOAD_ERROR_MESSAGE};
