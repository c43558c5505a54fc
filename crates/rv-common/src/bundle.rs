//! Report bundle returned by the report-data endpoint.

use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::selection::Selection;

/// Per-(host, date) payload: generated report plus raw logs and specs.
///
/// Produced only by a data fetch and never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    /// Host the bundle belongs to.
    pub host: String,
    /// Date the bundle belongs to.
    pub date: String,
    /// Structured-text report; empty when not yet generated.
    pub report: String,
    /// Raw log text.
    pub logs: String,
    /// Raw system specification text.
    pub specs: String,
}

impl ReportBundle {
    /// Decode a bundle from the endpoint's JSON body.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the bundle as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns true when the server has a generated report for this pair.
    pub fn has_report(&self) -> bool {
        !self.report.is_empty()
    }

    /// The (host, date) pair this bundle describes.
    pub fn selection(&self) -> Selection {
        Selection::new(self.host.clone(), self.date.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_from_json_reads_all_fields() {
        let json = r##"{"host":"web01","date":"2025-07-21","report":"# Hi","logs":"l","specs":"s"}"##;
        let bundle = ReportBundle::from_json(json).unwrap();
        assert_eq!(bundle.host, "web01");
        assert_eq!(bundle.date, "2025-07-21");
        assert_eq!(bundle.report, "# Hi");
        assert_eq!(bundle.logs, "l");
        assert_eq!(bundle.specs, "s");
        assert!(bundle.has_report());
    }

    #[test]
    fn test_report_markers_survive_json() {
        let json = r###"{"host":"h","date":"d","report":"## Disk\n- **sda** 97%\n---","logs":"","specs":""}"###;
        let bundle = ReportBundle::from_json(json).unwrap();
        assert_eq!(bundle.report, "## Disk\n- **sda** 97%\n---");

        let again = ReportBundle::from_json(&bundle.to_json().unwrap()).unwrap();
        assert_eq!(again, bundle);
    }

    #[test]
    fn test_empty_report_means_not_generated() {
        let json = r#"{"host":"h","date":"d","report":"","logs":"","specs":""}"#;
        let bundle = ReportBundle::from_json(json).unwrap();
        assert!(!bundle.has_report());
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let err = ReportBundle::from_json(r#"{"host":"h"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_selection_of_bundle() {
        let bundle = ReportBundle {
            host: "db02".into(),
            date: "2025-07-22".into(),
            ..Default::default()
        };
        assert_eq!(bundle.selection(), Selection::new("db02", "2025-07-22"));
    }
}
