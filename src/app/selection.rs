//! Single-slot master/detail selection.

use crate::domain::Competitor;

/// The competitor whose detail panel is open, if any.
///
/// The slot holds its own copy of the competitor so it does not depend on the
/// position or identity of rows in the filtered table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: Option<Competitor>,
}

impl Selection {
    /// Opens the detail view for `competitor`. Last call wins.
    pub fn select(&mut self, competitor: Competitor) {
        tracing::debug!(driver_id = %competitor.id, "competitor selected");
        self.selected = Some(competitor);
    }

    /// Closes the detail view. Idempotent.
    pub fn clear(&mut self) {
        if let Some(previous) = self.selected.take() {
            tracing::debug!(driver_id = %previous.id, "selection cleared");
        }
    }

    /// Competitor currently open, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Competitor> {
        self.selected.as_ref()
    }

    /// Returns whether a detail view is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(id: &str) -> Competitor {
        serde_json::from_value(serde_json::json!({
            "driverId": id,
            "givenName": "Given",
            "familyName": "Family",
            "rank": 1,
            "points": 0,
            "wins": 0,
            "dnfs": 0,
            "performance_index": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_last_select_wins() {
        let mut selection = Selection::default();
        selection.select(driver("a"));
        selection.select(driver("b"));
        assert_eq!(selection.selected().map(|c| c.id.as_str()), Some("b"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut selection = Selection::default();
        selection.clear();
        assert!(!selection.is_open());

        selection.select(driver("a"));
        selection.clear();
        selection.clear();
        assert!(!selection.is_open());
        assert!(selection.selected().is_none());
    }
}
