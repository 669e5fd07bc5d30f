//! Free-text roster filtering.
//!
//! A query matches a competitor when, after trimming and lowercasing, it is a
//! substring of either `"{given} {family}"` or the team name. Filtering keeps
//! the source order and has no side effects, so it is simply re-run after
//! every state change.

use crate::domain::Competitor;

/// Trims and lowercases a raw search query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Returns whether `competitor` matches an already normalized, non-empty needle.
#[must_use]
pub fn matches(competitor: &Competitor, needle: &str) -> bool {
    competitor.full_name().to_lowercase().contains(needle)
        || competitor.team_name().to_lowercase().contains(needle)
}

/// Filters `roster` by `query`, preserving order.
///
/// An empty (or whitespace-only) query returns every competitor.
///
/// ```
/// use pitwall::app::filter::filter_roster;
///
/// let roster: Vec<pitwall::domain::Competitor> = vec![];
/// assert!(filter_roster(&roster, "max").is_empty());
/// ```
#[must_use]
pub fn filter_roster<'a>(roster: &'a [Competitor], query: &str) -> Vec<&'a Competitor> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return roster.iter().collect();
    }

    roster.iter().filter(|c| matches(c, &needle)).collect()
}

/// Character range of the first occurrence of `query` in `text`, for highlighting.
///
/// Returns `None` when there is no match or when lowercasing changes the
/// character count of `text` (a few non-ASCII letters do), since the indices
/// would no longer line up with the displayed text.
#[must_use]
pub fn highlight_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return None;
    }

    let haystack = text.to_lowercase();
    if haystack.chars().count() != text.chars().count() {
        return None;
    }

    let byte_start = haystack.find(&needle)?;
    let start = haystack[..byte_start].chars().count();
    Some((start, start + needle.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn competitor(id: &str, given: &str, family: &str, team: Option<&str>, rank: u32) -> Competitor {
        Competitor {
            id: id.to_string(),
            given_name: given.to_string(),
            family_name: family.to_string(),
            team: team.map(str::to_string),
            nationality: None,
            rank,
            points: 0.0,
            wins: 0,
            dnfs: 0,
            avg_quali: None,
            avg_grid: None,
            avg_finish: None,
            performance_index: 0.0,
            results: vec![],
        }
    }

    fn grid() -> Vec<Competitor> {
        vec![
            competitor("max_verstappen", "Max", "Verstappen", Some("Red Bull"), 1),
            competitor("norris", "Lando", "Norris", Some("McLaren"), 2),
            competitor("leclerc", "Charles", "Leclerc", Some("Ferrari"), 3),
            competitor("perez", "Sergio", "Pérez", Some("Red Bull"), 4),
            competitor("privateer", "Max", "Mustermann", None, 5),
        ]
    }

    fn ids(filtered: &[&Competitor]) -> Vec<String> {
        filtered.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_team_match_is_case_insensitive() {
        let roster = grid();
        assert_eq!(ids(&filter_roster(&roster, "red")), vec!["max_verstappen", "perez"]);
        assert_eq!(ids(&filter_roster(&roster, "  RED bull ")), vec!["max_verstappen", "perez"]);
    }

    #[test]
    fn test_full_name_spans_given_and_family() {
        let roster = grid();
        assert_eq!(ids(&filter_roster(&roster, "max v")), vec!["max_verstappen"]);
        assert_eq!(ids(&filter_roster(&roster, "max")), vec!["max_verstappen", "privateer"]);
    }

    #[test]
    fn test_absent_team_never_matches_team_query() {
        let roster = grid();
        assert_eq!(ids(&filter_roster(&roster, "mclaren")), vec!["norris"]);
        assert!(filter_roster(&roster, "williams").is_empty());
    }

    #[test]
    fn test_whitespace_query_is_identity() {
        let roster = grid();
        assert_eq!(filter_roster(&roster, "   ").len(), roster.len());
    }

    #[test]
    fn test_highlight_range_uses_char_indices() {
        assert_eq!(highlight_range("Sergio Pérez", "pér"), Some((7, 10)));
        assert_eq!(highlight_range("Max Verstappen", "VERS"), Some((4, 8)));
        assert_eq!(highlight_range("Max Verstappen", "ferrari"), None);
        assert_eq!(highlight_range("Max Verstappen", ""), None);
    }

    fn arb_competitor() -> impl Strategy<Value = Competitor> {
        (
            "[a-z]{1,6}",
            "[A-Za-z]{1,8}",
            "[A-Za-z]{1,10}",
            proptest::option::of("[A-Za-z ]{1,12}"),
            1u32..40,
        )
            .prop_map(|(id, given, family, team, rank)| {
                competitor(&id, &given, &family, team.as_deref(), rank)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_empty_query_is_identity(roster in proptest::collection::vec(arb_competitor(), 0..12)) {
            let filtered = filter_roster(&roster, "");
            prop_assert_eq!(filtered.len(), roster.len());
            for (kept, original) in filtered.iter().zip(roster.iter()) {
                prop_assert!(std::ptr::eq(*kept, original));
            }
        }

        #[test]
        fn prop_filter_is_ordered_subsequence(
            roster in proptest::collection::vec(arb_competitor(), 0..12),
            query in "[A-Za-z ]{0,4}",
        ) {
            let filtered = filter_roster(&roster, &query);
            let positions = filtered.iter().map(|kept| {
                roster.iter().position(|c| std::ptr::eq(c, *kept)).unwrap()
            });
            let mut previous = None;
            for position in positions {
                if let Some(prev) = previous {
                    prop_assert!(position > prev);
                }
                previous = Some(position);
            }
        }

        #[test]
        fn prop_refined_query_narrows_result(
            roster in proptest::collection::vec(arb_competitor(), 0..12),
            broad in "[a-z]{1,3}",
            suffix in "[a-z]{1,3}",
        ) {
            let narrow = format!("{broad}{suffix}");
            let broad_hits = filter_roster(&roster, &broad);
            let narrow_hits = filter_roster(&roster, &narrow);
            for hit in narrow_hits {
                prop_assert!(broad_hits.iter().any(|b| std::ptr::eq(*b, hit)));
            }
        }
    }
}
