//! Markup rendering for the report viewer.
//!
//! Everything in this crate is a pure function of its input:
//!
//! - [`escape_html`]: raw text to markup-safe text
//! - [`convert`]: structured text (a small markdown-like subset) to markup
//! - [`render_report`]: escape-then-convert, used for the report pane
//! - [`DisplayRegion`]: header, tab selectors and content panes for a bundle
//! - [`host_options`] / [`date_options`]: selector option lists
//!
//! # Example
//!
//! ```
//! use rv_common::{ActiveTab, ReportBundle};
//! use rv_render::{convert, DisplayRegion};
//!
//! assert_eq!(convert("## Summary"), "<h2>Summary</h2>");
//!
//! let bundle = ReportBundle {
//!     host: "web01".into(),
//!     date: "2025-07-21".into(),
//!     report: "# Disk pressure".into(),
//!     ..Default::default()
//! };
//! let html = DisplayRegion::from_bundle(&bundle, ActiveTab::Report).render();
//! assert!(html.contains("<h1>Disk pressure</h1>"));
//! ```

pub mod escape;
pub mod markup;
pub mod options;
pub mod view;

pub use escape::escape_html;
pub use markup::{convert, render_report, Rule, RULES};
pub use options::{date_options, host_options};
pub use view::{
    render_message, render_report_pane, DisplayRegion, ReportPane, FETCH_ERROR_MESSAGE,
};
