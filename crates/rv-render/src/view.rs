//! Display-region rendering.
//!
//! The display region is rebuilt from scratch on every state change: a
//! header with the host/date label and one selector per tab, followed by the
//! three content panes. Exactly one pane is visible and its selector is
//! fully opaque; the others are hidden and dimmed.
//!
//! Tab selectors carry `data-tab` and action buttons carry `data-action`
//! so the embedding page can bind its event handlers.

use rv_common::{ActiveTab, ReportBundle};

use crate::escape::escape_html;
use crate::markup::render_report;

/// Message shown when fetching a report bundle fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

/// Opacity of inactive tab selectors.
pub const DIMMED_OPACITY: &str = "0.42";

/// `data-action` value of the generate/regenerate buttons.
pub const GENERATE_ACTION: &str = "generate";

/// Content of the report pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPane<'a> {
    /// Structured-text report from the bundle; empty when not yet generated.
    Report(&'a str),
    /// Generation requested and not yet finished.
    Generating,
    /// Generation failed with this message.
    GenerateFailed(&'a str),
}

/// Everything needed to render a loaded display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRegion<'a> {
    pub host: &'a str,
    pub date: &'a str,
    pub report: ReportPane<'a>,
    pub logs: &'a str,
    pub specs: &'a str,
    pub active: ActiveTab,
}

impl<'a> DisplayRegion<'a> {
    /// Region for a freshly loaded bundle.
    pub fn from_bundle(bundle: &'a ReportBundle, active: ActiveTab) -> Self {
        Self {
            host: &bundle.host,
            date: &bundle.date,
            report: ReportPane::Report(&bundle.report),
            logs: &bundle.logs,
            specs: &bundle.specs,
            active,
        }
    }

    /// Replace the report pane, leaving logs and specs untouched.
    pub fn with_report_pane(mut self, report: ReportPane<'a>) -> Self {
        self.report = report;
        self
    }

    /// Render the whole region.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="report-header"><span class="report-label">{host} : {date}</span> &nbsp; {tabs}</div><div id="report_tab_content">{report}{logs}{specs}</div>"#,
            host = escape_html(self.host),
            date = escape_html(self.date),
            tabs = self.render_tab_selectors(),
            report = self.render_pane(ActiveTab::Report, &render_report_pane(self.report)),
            logs = self.render_pane(ActiveTab::Logs, &render_preformatted(self.logs)),
            specs = self.render_pane(ActiveTab::Specs, &render_preformatted(self.specs)),
        )
    }

    fn render_tab_selectors(&self) -> String {
        ActiveTab::ALL
            .iter()
            .map(|tab| {
                format!(
                    r#"<span id="{id}" class="report-tab" data-tab="{name}" style="opacity:{opacity}">{label}</span>"#,
                    id = tab_selector_id(*tab),
                    name = tab.as_str(),
                    opacity = if *tab == self.active { "1" } else { DIMMED_OPACITY },
                    label = tab.label(),
                )
            })
            .collect::<Vec<_>>()
            .join(" &nbsp; ")
    }

    fn render_pane(&self, tab: ActiveTab, content: &str) -> String {
        format!(
            r#"<div id="{id}" style="display:{display}">{content}</div>"#,
            id = pane_id(tab),
            display = if tab == self.active { "block" } else { "none" },
        )
    }
}

/// Element id of a tab's content pane.
pub fn pane_id(tab: ActiveTab) -> String {
    format!("report_content_{}", tab.as_str())
}

/// Element id of a tab's selector.
pub fn tab_selector_id(tab: ActiveTab) -> String {
    format!("report_content_tab_{}", tab.as_str())
}

/// Render the inner markup of the report pane.
pub fn render_report_pane(pane: ReportPane<'_>) -> String {
    match pane {
        ReportPane::Report("") => format!(
            r#"<div class="no-report-message-generate">No Report Generated<br /><br /><button data-action="{GENERATE_ACTION}">Generate Now</button></div>"#
        ),
        ReportPane::Report(text) => format!(
            r#"{}<div class="report-actions" style="text-align:right;padding:42px;"><button data-action="{GENERATE_ACTION}">Regenerate Report</button></div>"#,
            render_report(text)
        ),
        ReportPane::Generating => {
            r#"<div class="no-report-message-generate">&nbsp;<br /><br />Generating ...</div>"#
                .to_string()
        }
        ReportPane::GenerateFailed(message) => render_preformatted(message),
    }
}

/// Render a plain message (fetch errors) as escaped text.
pub fn render_message(message: &str) -> String {
    escape_html(message).into_owned()
}

fn render_preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(report: &str) -> ReportBundle {
        ReportBundle {
            host: "web01".into(),
            date: "2025-07-21".into(),
            report: report.into(),
            logs: "kernel: <oops>".into(),
            specs: "cpu: 8".into(),
        }
    }

    #[test]
    fn test_empty_report_offers_generate_now() {
        let html = render_report_pane(ReportPane::Report(""));
        assert!(html.contains("No Report Generated"));
        assert!(html.contains("Generate Now"));
        assert!(html.contains(r#"data-action="generate""#));
        assert!(!html.contains("Regenerate"));
    }

    #[test]
    fn test_report_offers_regenerate() {
        let html = render_report_pane(ReportPane::Report("# Disk"));
        assert!(html.starts_with("<h1>Disk</h1>"));
        assert!(html.contains("Regenerate Report"));
        assert!(!html.contains("Generate Now"));
    }

    #[test]
    fn test_generating_placeholder() {
        let html = render_report_pane(ReportPane::Generating);
        assert!(html.contains("Generating ..."));
    }

    #[test]
    fn test_generate_failure_is_escaped() {
        assert_eq!(
            render_report_pane(ReportPane::GenerateFailed("Response status: <500>")),
            "<pre>Response status: &lt;500&gt;</pre>"
        );
    }

    #[test]
    fn test_region_shows_only_active_pane() {
        let b = bundle("# R");
        let html = DisplayRegion::from_bundle(&b, ActiveTab::Logs).render();
        assert!(html.contains(r#"<div id="report_content_logs" style="display:block">"#));
        assert!(html.contains(r#"<div id="report_content_report" style="display:none">"#));
        assert!(html.contains(r#"<div id="report_content_specs" style="display:none">"#));
        assert!(html.contains(r#"data-tab="logs" style="opacity:1""#));
        assert!(html.contains(r#"data-tab="report" style="opacity:0.42""#));
        assert!(html.contains(r#"data-tab="specs" style="opacity:0.42""#));
    }

    #[test]
    fn test_region_escapes_raw_fields() {
        let b = bundle("");
        let html = DisplayRegion::from_bundle(&b, ActiveTab::Report).render();
        assert!(html.contains("<pre>kernel: &lt;oops&gt;</pre>"));
        assert!(html.contains("<pre>cpu: 8</pre>"));
        assert!(html.contains("web01 : 2025-07-21"));
    }

    #[test]
    fn test_with_report_pane_keeps_logs() {
        let b = bundle("# R");
        let html = DisplayRegion::from_bundle(&b, ActiveTab::Report)
            .with_report_pane(ReportPane::Generating)
            .render();
        assert!(html.contains("Generating ..."));
        assert!(!html.contains("<h1>R</h1>"));
        assert!(html.contains("kernel: &lt;oops&gt;"));
    }

    #[test]
    fn test_ids() {
        assert_eq!(pane_id(ActiveTab::Specs), "report_content_specs");
        assert_eq!(tab_selector_id(ActiveTab::Report), "report_content_tab_report");
    }

    #[test]
    fn test_render_message() {
        assert_eq!(render_message(FETCH_ERROR_MESSAGE), "Error fetching data");
    }
}
