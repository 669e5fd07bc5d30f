//! Remote aggregation service client.
//!
//! The plugin never performs I/O itself: the application layer emits an
//! [`Action::FetchSeason`](crate::app::Action::FetchSeason) carrying a
//! [`FetchRequest`], the Zellij shim turns it into a `web_request`, and the
//! resulting `WebRequestResult` is decoded here back into a [`FetchContext`]
//! and a [`FetchOutcome`].
//!
//! # Modules
//!
//! - `endpoint`: Base URL handling and request URL construction
//! - `context`: Request identity and trace context propagation
//! - `response`: Status and payload interpretation

pub mod context;
pub mod endpoint;
pub mod response;

pub use context::{FetchContext, FetchRequest, TraceContext};
pub use endpoint::Endpoint;
pub use response::{parse_season_summary, FetchOutcome};
