//! Aggregation endpoint addressing.

/// Path of the season summary resource, relative to the backend base URL.
pub const SEASON_SUMMARY_PATH: &str = "/api/season/summary";

/// Location of the remote aggregation service.
///
/// With no base URL configured, requests are issued with a relative path, the
/// same way a browser client resolves them against the host serving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    base_url: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint from an optional base URL.
    ///
    /// Blank values count as unset and a trailing `/` is dropped so that the
    /// joined URL never contains `//api`.
    #[must_use]
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Self { base_url }
    }

    /// Configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// URL of the season summary for `season`.
    ///
    /// ```
    /// use pitwall::client::Endpoint;
    ///
    /// let endpoint = Endpoint::new(Some("https://stats.example.com/".to_string()));
    /// assert_eq!(
    ///     endpoint.season_summary_url(2024),
    ///     "https://stats.example.com/api/season/summary?season=2024"
    /// );
    /// assert_eq!(
    ///     Endpoint::default().season_summary_url(1950),
    ///     "/api/season/summary?season=1950"
    /// );
    /// ```
    #[must_use]
    pub fn season_summary_url(&self, season: i32) -> String {
        format!(
            "{}{SEASON_SUMMARY_PATH}?season={season}",
            self.base_url.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_base_url_is_relative() {
        let endpoint = Endpoint::new(Some("   ".to_string()));
        assert_eq!(endpoint.base_url(), None);
        assert_eq!(endpoint.season_summary_url(2024), "/api/season/summary?season=2024");
    }

    #[test]
    fn test_negative_season_is_passed_through() {
        let endpoint = Endpoint::new(Some("http://localhost:8000".to_string()));
        assert_eq!(
            endpoint.season_summary_url(-1),
            "http://localhost:8000/api/season/summary?season=-1"
        );
    }
}
