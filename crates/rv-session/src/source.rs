//! Fetch boundary: where report bundles come from.
//!
//! The controller never talks to the network. A runtime takes the
//! [`crate::Cmd`]s it emits and answers them through a [`ReportSource`].
//! [`HttpReportSource`] is the real implementation against the report
//! server's `/report-data` and `/report-generate` endpoints.

use std::time::Duration;

use rv_common::{FetchError, ReportBundle, Selection};
use tracing::{debug, trace};

use crate::config::SourceConfig;

/// Path of the bundle endpoint.
pub const REPORT_DATA_PATH: &str = "/report-data";

/// Path of the generation endpoint.
pub const REPORT_GENERATE_PATH: &str = "/report-generate";

/// Provider of report bundles and report generation.
pub trait ReportSource {
    /// Fetch the bundle for a complete selection.
    fn fetch_report(&self, selection: &Selection) -> Result<ReportBundle, FetchError>;

    /// Ask the server to (re)generate the report. The response body is
    /// ignored; only the status matters.
    fn generate_report(&self, selection: &Selection) -> Result<(), FetchError>;
}

impl<S: ReportSource + ?Sized> ReportSource for &S {
    fn fetch_report(&self, selection: &Selection) -> Result<ReportBundle, FetchError> {
        (**self).fetch_report(selection)
    }

    fn generate_report(&self, selection: &Selection) -> Result<(), FetchError> {
        (**self).generate_report(selection)
    }
}

impl<S: ReportSource + ?Sized> ReportSource for Box<S> {
    fn fetch_report(&self, selection: &Selection) -> Result<ReportBundle, FetchError> {
        (**self).fetch_report(selection)
    }

    fn generate_report(&self, selection: &Selection) -> Result<(), FetchError> {
        (**self).generate_report(selection)
    }
}

/// [`ReportSource`] backed by the report server over HTTP.
pub struct HttpReportSource {
    base_url: String,
    fetch_agent: ureq::Agent,
    generate_agent: ureq::Agent,
}

impl HttpReportSource {
    /// Build a source from configuration. Fetch and generate requests use
    /// separate agents because their timeouts differ by two orders of
    /// magnitude.
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_agent: agent_with_timeout(config.fetch_timeout()),
            generate_agent: agent_with_timeout(config.generate_timeout()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` with the selection query.
    pub fn endpoint_url(&self, path: &str, selection: &Selection) -> String {
        format!("{}{}?{}", self.base_url, path, selection.query())
    }
}

fn agent_with_timeout(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

fn map_ureq_error(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(code, _) => FetchError::Status(code),
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}

impl ReportSource for HttpReportSource {
    fn fetch_report(&self, selection: &Selection) -> Result<ReportBundle, FetchError> {
        let url = self.endpoint_url(REPORT_DATA_PATH, selection);
        debug!(%url, "GET report data");

        let response = self.fetch_agent.get(&url).call().map_err(map_ureq_error)?;
        trace!(status = response.status(), "report data response");
        response
            .into_json::<ReportBundle>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn generate_report(&self, selection: &Selection) -> Result<(), FetchError> {
        let url = self.endpoint_url(REPORT_GENERATE_PATH, selection);
        debug!(%url, "GET report generate");

        let response = self
            .generate_agent
            .get(&url)
            .call()
            .map_err(map_ureq_error)?;
        trace!(status = response.status(), "report generate response");
        Ok(())
    }
}
