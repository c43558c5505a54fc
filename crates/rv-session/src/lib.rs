//! Report session controller for the report viewer.
//!
//! This crate provides:
//! - [`ReportSession`]: the selection/view/tab state machine
//! - [`Msg`] / [`Cmd`]: its input and output vocabulary
//! - [`ReportSource`] and [`HttpReportSource`]: where bundles come from
//! - [`SessionRuntime`]: a synchronous driver with clock-based retries
//! - [`ViewerConfig`]: JSON-backed configuration

pub mod config;
pub mod error;
pub mod msg;
pub mod runtime;
pub mod session;
pub mod source;

pub use config::{SessionConfig, SourceConfig, ViewerConfig};
pub use error::{Result, SessionError};
pub use msg::{Cmd, Msg, Ticket};
pub use runtime::{Clock, ManualClock, SessionRuntime, SystemClock};
pub use session::{ReportSession, ViewState};
pub use source::{HttpReportSource, ReportSource, REPORT_DATA_PATH, REPORT_GENERATE_PATH};
