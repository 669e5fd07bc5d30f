//! Competitor and round result models.
//!
//! These types mirror the season summary payload produced by the remote
//! aggregation service. Statistics are taken as-is: nothing here recomputes,
//! validates, or re-ranks what the service sends. Optional numbers stay
//! optional all the way to the renderer so that "not classified" is never
//! confused with zero.

use serde::{Deserialize, Serialize};

/// One driver's aggregated statistics for a single season.
///
/// Field names follow the wire format (`driverId`, `givenName`, `constructor`,
/// `avg_quali`, ...). `rank` is the standing supplied by the source and is the
/// only ordering the plugin ever uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(rename = "driverId")]
    pub id: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    #[serde(rename = "constructor", default)]
    pub team: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    pub rank: u32,
    pub points: f64,
    #[serde(deserialize_with = "whole_number")]
    pub wins: u32,
    #[serde(deserialize_with = "whole_number")]
    pub dnfs: u32,
    #[serde(default)]
    pub avg_quali: Option<f64>,
    #[serde(default)]
    pub avg_grid: Option<f64>,
    #[serde(default)]
    pub avg_finish: Option<f64>,
    pub performance_index: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<RoundResult>,
}

/// A competitor's outcome in one round of the season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    #[serde(deserialize_with = "whole_number")]
    pub round: u32,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub quali: Option<u32>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub grid: Option<u32>,
    /// Classified finishing position.
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub position: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    pub points: f64,
}

/// Top-level response body of the season summary endpoint.
///
/// A missing or `null` `drivers` field is an empty roster, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drivers: Vec<Competitor>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts and positions arrive as `3` or `3.0` depending on the source's
/// column types; both are the same value.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    as_whole(value).ok_or_else(|| {
        serde::de::Error::invalid_value(
            serde::de::Unexpected::Float(value),
            &"a non-negative whole number",
        )
    })
}

fn optional_whole_number<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => as_whole(value).map(Some).ok_or_else(|| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Float(value),
                &"a non-negative whole number",
            )
        }),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_whole(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)).then(|| value as u32)
}

impl Competitor {
    /// Returns `"{given} {family}"`, the name searched and displayed.
    ///
    /// ```
    /// # use pitwall::domain::Competitor;
    /// # let driver: Competitor = serde_json::from_str(r#"{"driverId":"max_verstappen",
    /// #   "givenName":"Max","familyName":"Verstappen","rank":1,"points":0,"wins":0,
    /// #   "dnfs":0,"performance_index":0}"#).unwrap();
    /// assert_eq!(driver.full_name(), "Max Verstappen");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Team name, or the empty string when the source omits it.
    #[must_use]
    pub fn team_name(&self) -> &str {
        self.team.as_deref().unwrap_or("")
    }

    /// Round results ordered by round number.
    ///
    /// The source usually sends rounds in order already; the sort is stable so
    /// an ordered sequence comes back untouched.
    #[must_use]
    pub fn rounds_in_order(&self) -> Vec<&RoundResult> {
        let mut rounds: Vec<&RoundResult> = self.results.iter().collect();
        rounds.sort_by_key(|r| r.round);
        rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_stay_absent() {
        let json = r#"{
            "driverId": "rookie",
            "givenName": "New",
            "familyName": "Driver",
            "rank": 20,
            "points": 0,
            "wins": 0,
            "dnfs": 1,
            "avg_quali": null,
            "performance_index": 12.5,
            "results": [{"round": 1, "quali": null, "status": "Engine", "points": 0}]
        }"#;

        let driver: Competitor = serde_json::from_str(json).unwrap();
        assert_eq!(driver.avg_quali, None);
        assert_eq!(driver.avg_grid, None);
        assert_eq!(driver.avg_finish, None);
        assert_eq!(driver.team, None);
        assert_eq!(driver.team_name(), "");

        let round = &driver.results[0];
        assert_eq!(round.quali, None);
        assert_eq!(round.grid, None);
        assert_eq!(round.position, None);
        assert_eq!(round.status.as_deref(), Some("Engine"));
    }

    #[test]
    fn test_missing_drivers_is_empty_summary() {
        let summary: SeasonSummary = serde_json::from_str(r#"{"season": 1950}"#).unwrap();
        assert!(summary.drivers.is_empty());

        let summary: SeasonSummary = serde_json::from_str(r#"{"drivers": null}"#).unwrap();
        assert!(summary.drivers.is_empty());
    }

    #[test]
    fn test_null_results_is_empty_sequence() {
        let json = r#"{"driverId":"a","givenName":"A","familyName":"B","rank":1,
            "points":1,"wins":0,"dnfs":0,"performance_index":1,"results":null}"#;
        let driver: Competitor = serde_json::from_str(json).unwrap();
        assert!(driver.results.is_empty());
    }

    #[test]
    fn test_integral_floats_are_whole_numbers() {
        let json = r#"{"driverId":"a","givenName":"A","familyName":"B","rank":2.0,
            "points":18,"wins":0.0,"dnfs":1.0,"performance_index":70,
            "results":[{"round":1.0,"quali":3.0,"grid":null,"position":2.0,"points":18}]}"#;
        let driver: Competitor = serde_json::from_str(json).unwrap();
        assert_eq!((driver.rank, driver.wins, driver.dnfs), (2, 0, 1));

        let round = &driver.results[0];
        assert_eq!(round.round, 1);
        assert_eq!(round.quali, Some(3));
        assert_eq!(round.grid, None);
        assert_eq!(round.position, Some(2));
    }

    #[test]
    fn test_fractional_rank_is_rejected() {
        let json = r#"{"driverId":"a","givenName":"A","familyName":"B","rank":1.5,
            "points":0,"wins":0,"dnfs":0,"performance_index":0}"#;
        assert!(serde_json::from_str::<Competitor>(json).is_err());
    }

    #[test]
    fn test_rounds_in_order_sorts_by_round() {
        let json = r#"{"driverId":"a","givenName":"A","familyName":"B","rank":1,
            "points":26,"wins":1,"dnfs":0,"performance_index":80,
            "results":[{"round":3,"points":0},{"round":1,"points":25},{"round":2,"points":1}]}"#;
        let driver: Competitor = serde_json::from_str(json).unwrap();
        let rounds: Vec<u32> = driver.rounds_in_order().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
    }
}
