//! Interpretation of season summary responses.

use crate::domain::{Competitor, PitwallError, Result, SeasonSummary};

/// Result of a season fetch as seen by the application layer.
///
/// The failure cause is kept for logging only; the state machine exposes a
/// single generic message regardless of what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The request succeeded and the body decoded into a roster.
    Loaded(Vec<Competitor>),

    /// Non-success status, transport failure, or malformed payload.
    Failed {
        /// Description of the underlying failure.
        cause: String,
    },
}

impl From<Result<Vec<Competitor>>> for FetchOutcome {
    fn from(result: Result<Vec<Competitor>>) -> Self {
        match result {
            Ok(drivers) => Self::Loaded(drivers),
            Err(e) => Self::Failed { cause: e.to_string() },
        }
    }
}

/// Returns whether `status` is a 2xx success code.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Decodes a season summary response into the roster it carries.
///
/// # Errors
///
/// - [`PitwallError::Http`] for any status outside 2xx
/// - [`PitwallError::Payload`] when the body is not a season summary object
pub fn parse_season_summary(status: u16, body: &[u8]) -> Result<Vec<Competitor>> {
    if !is_success(status) {
        return Err(PitwallError::Http { status });
    }

    let summary: SeasonSummary = serde_json::from_slice(body)?;

    tracing::debug!(driver_count = summary.drivers.len(), "season summary decoded");

    Ok(summary.drivers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DRIVERS: &str = r#"{"drivers":[
        {"driverId":"max_verstappen","givenName":"Max","familyName":"Verstappen",
         "constructor":"Red Bull","nationality":"Dutch","rank":1,"points":437,"wins":9,
         "dnfs":1,"avg_quali":3.2,"avg_grid":3.5,"avg_finish":2.9,"performance_index":91.4},
        {"driverId":"norris","givenName":"Lando","familyName":"Norris",
         "constructor":"McLaren","nationality":"British","rank":2,"points":374,"wins":4,
         "dnfs":0,"avg_quali":null,"avg_grid":4.0,"avg_finish":4.1,"performance_index":85}
    ]}"#;

    #[test]
    fn test_success_parses_drivers_in_source_order() {
        let drivers = parse_season_summary(200, TWO_DRIVERS.as_bytes()).unwrap();
        let ranks: Vec<u32> = drivers.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(drivers[1].avg_quali, None);
    }

    #[test]
    fn test_non_success_status_is_http_error() {
        let err = parse_season_summary(500, TWO_DRIVERS.as_bytes()).unwrap_err();
        assert!(matches!(err, PitwallError::Http { status: 500 }));

        let err = parse_season_summary(404, b"").unwrap_err();
        assert!(matches!(err, PitwallError::Http { status: 404 }));
    }

    #[test]
    fn test_malformed_body_is_payload_error() {
        assert!(matches!(
            parse_season_summary(200, b"<html>oops</html>"),
            Err(PitwallError::Payload(_))
        ));
        assert!(matches!(
            parse_season_summary(200, br#"{"drivers":[{"driverId":"x"}]}"#),
            Err(PitwallError::Payload(_))
        ));
    }

    #[test]
    fn test_float_encoded_counts_are_accepted() {
        let body = br#"{"drivers":[{"driverId":"max_verstappen","givenName":"Max",
            "familyName":"Verstappen","rank":1.0,"points":437,"wins":9.0,"dnfs":1.0,
            "performance_index":91.4,
            "results":[{"round":1,"quali":3.0,"grid":2.0,"position":1.0,"points":25}]}]}"#;

        let drivers = parse_season_summary(200, body).unwrap();
        assert_eq!(drivers[0].rank, 1);
        assert_eq!(drivers[0].wins, 9);
        assert_eq!(drivers[0].results[0].quali, Some(3));
        assert_eq!(drivers[0].results[0].position, Some(1));
    }

    #[test]
    fn test_missing_collection_is_empty_roster() {
        let drivers = parse_season_summary(200, br#"{"season":1950}"#).unwrap();
        assert!(drivers.is_empty());
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome = FetchOutcome::from(parse_season_summary(502, b""));
        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                cause: "HTTP error: unexpected status 502".to_string()
            }
        );

        let outcome = FetchOutcome::from(parse_season_summary(200, br#"{"drivers":[]}"#));
        assert_eq!(outcome, FetchOutcome::Loaded(vec![]));
    }
}
