//! The user's (host, date) selection.

use serde::{Deserialize, Serialize};

/// Host/date pair driving every fetch.
///
/// An empty field means "unselected". Network actions are only permitted
/// once both fields are non-empty (see [`Selection::is_complete`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Selected host name.
    pub host: String,
    /// Selected report date.
    pub date: String,
}

impl Selection {
    /// Create a selection from a host and a date.
    pub fn new(host: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            date: date.into(),
        }
    }

    /// Returns true when both host and date are set.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.date.is_empty()
    }

    /// Percent-encoded query string: `host=<enc>&date=<enc>`.
    pub fn query(&self) -> String {
        format!(
            "host={}&date={}",
            urlencoding::encode(&self.host),
            urlencoding::encode(&self.date)
        )
    }

    /// Address-fragment mirror: `#?host=<enc>&date=<enc>`.
    ///
    /// Returns `None` for an incomplete selection; the mirror is only
    /// written once both values are present.
    pub fn fragment(&self) -> Option<String> {
        self.is_complete().then(|| format!("#?{}", self.query()))
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.host, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_incomplete() {
        assert!(!Selection::default().is_complete());
    }

    #[test]
    fn test_half_selections_are_incomplete() {
        assert!(!Selection::new("", "2025-07-21").is_complete());
        assert!(!Selection::new("web01", "").is_complete());
        assert!(Selection::new("web01", "2025-07-21").is_complete());
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let sel = Selection::new("web 01&x", "2025/07/21");
        assert_eq!(sel.query(), "host=web%2001%26x&date=2025%2F07%2F21");
    }

    #[test]
    fn test_fragment_format() {
        let sel = Selection::new("web01", "2025-07-21");
        assert_eq!(
            sel.fragment().as_deref(),
            Some("#?host=web01&date=2025-07-21")
        );
    }

    #[test]
    fn test_fragment_absent_when_incomplete() {
        assert_eq!(Selection::new("web01", "").fragment(), None);
    }

    #[test]
    fn test_display_matches_header_label() {
        assert_eq!(
            Selection::new("web01", "2025-07-21").to_string(),
            "web01 : 2025-07-21"
        );
    }
}
