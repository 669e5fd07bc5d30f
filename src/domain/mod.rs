//! Domain layer for the Pitwall plugin.
//!
//! Core domain types independent of Zellij APIs: the competitor model as
//! delivered by the aggregation service and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`competitor`]: Competitor, round result, and season summary models

pub mod competitor;
pub mod error;

pub use competitor::{Competitor, RoundResult, SeasonSummary};
pub use error::{PitwallError, Result};
