//! Error types for the Pitwall plugin.
//!
//! This module defines the centralized error type [`PitwallError`] and a type alias
//! [`Result`] used throughout the plugin. Errors never escape to the user verbatim:
//! fetch failures are folded into a generic message at the state boundary and the
//! underlying cause is only logged.

use thiserror::Error;

/// The main error type for Pitwall plugin operations.
///
/// # Examples
///
/// ```
/// use pitwall::domain::PitwallError;
///
/// let err = PitwallError::Http { status: 503 };
/// assert_eq!(err.to_string(), "HTTP error: unexpected status 503");
/// ```
#[derive(Debug, Error)]
pub enum PitwallError {
    /// The aggregation endpoint answered with a non-success status.
    ///
    /// Zellij reports transport failures (unreachable host, DNS, TLS) as a
    /// non-success status as well, so this variant covers both.
    #[error("HTTP error: unexpected status {status}")]
    Http {
        /// Status code reported for the request.
        status: u16,
    },

    /// The response body could not be decoded into a season summary.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// A web request result arrived without a usable request context.
    #[error("Request context error: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Pitwall operations.
pub type Result<T> = std::result::Result<T, PitwallError>;
