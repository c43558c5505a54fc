//! Report viewer common types and errors.
//!
//! This crate provides the foundational types shared by the renderer, the
//! session controller and the CLI:
//! - The user's (host, date) [`Selection`] and its address-fragment mirror
//! - The [`ReportBundle`] payload returned by the report-data endpoint
//! - The [`ActiveTab`] of the display region
//! - The [`HostMap`] used to populate the host/date selectors
//! - [`FetchError`], the failure type of the external fetch boundary

pub mod bundle;
pub mod error;
pub mod host_map;
pub mod selection;
pub mod tab;

pub use bundle::ReportBundle;
pub use error::{FetchError, FetchResult};
pub use host_map::HostMap;
pub use selection::Selection;
pub use tab::ActiveTab;
