//! Messages into and commands out of the session controller.
//!
//! The controller follows an Elm-style contract: every input (user action,
//! completed request, fired timer) is a [`Msg`], and every side effect the
//! controller wants performed is a [`Cmd`]. Completions carry the [`Ticket`]
//! of the command that caused them so that stale results can be recognised.
//!
//! When adding new variants:
//! - Keep user-input messages free of tickets; only completions carry one
//! - Update `ReportSession::update` to handle the new transition explicitly

use std::time::Duration;

use rv_common::{ActiveTab, FetchError, ReportBundle, Selection};

/// Identity of one outstanding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket {
    /// Selection generation the operation was issued under.
    pub generation: u64,
    /// Monotonically increasing request number.
    pub request: u64,
}

/// Single message type consumed by [`crate::ReportSession::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Selection messages
    /// Host selector changed.
    SelectHost(String),
    /// Date selector changed.
    SelectDate(String),
    /// Both selectors changed at once.
    Select(Selection),

    // Action messages
    /// Re-fetch the bundle for the current selection.
    Refresh,
    /// "Generate Now" / "Regenerate Report" clicked.
    GenerateRequested,
    /// Tab selector clicked.
    TabClicked(ActiveTab),

    // Async result messages
    /// A report-data request finished.
    ReportLoaded {
        ticket: Ticket,
        result: Result<ReportBundle, FetchError>,
    },
    /// A report-generate request finished.
    GenerateFinished {
        ticket: Ticket,
        result: Result<(), FetchError>,
    },
    /// The post-failure retry delay elapsed.
    RetryElapsed { ticket: Ticket },
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Write the address-fragment mirror.
    SetFragment(String),
    /// Call the report-data endpoint; answer with [`Msg::ReportLoaded`].
    FetchReport { ticket: Ticket, selection: Selection },
    /// Call the report-generate endpoint; answer with [`Msg::GenerateFinished`].
    GenerateReport { ticket: Ticket, selection: Selection },
    /// Deliver [`Msg::RetryElapsed`] once `delay` has passed.
    ScheduleRetry { ticket: Ticket, delay: Duration },
}

impl Msg {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Msg::SelectHost(_) => "select_host",
            Msg::SelectDate(_) => "select_date",
            Msg::Select(_) => "select",
            Msg::Refresh => "refresh",
            Msg::GenerateRequested => "generate_requested",
            Msg::TabClicked(_) => "tab_clicked",
            Msg::ReportLoaded { .. } => "report_loaded",
            Msg::GenerateFinished { .. } => "generate_finished",
            Msg::RetryElapsed { .. } => "retry_elapsed",
        }
    }
}
