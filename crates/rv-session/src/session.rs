//! Report session controller.
//!
//! Owns the host/date selection, the view state and the active tab, and
//! decides which requests to issue. It performs no I/O itself: `update`
//! returns [`Cmd`]s and results come back as [`Msg`]s (see `crate::runtime`
//! for a driver).
//!
//! ## Lifecycle
//!
//! ```text
//! idle ──select──▶ fetch-in-flight ──ok──▶ displayed(report|logs|specs)
//!                        │                      │  ▲ switch tab
//!                        └──err──▶ error        ▼  │
//!                                    └──generate──▶ generating
//!                                                      │ ok: fetch
//!                                                      │ err: show message, retry fetch once after delay
//! ```
//!
//! ## Staleness
//!
//! Every selection change bumps a generation counter and every request gets
//! a fresh request number. With `discard_stale_responses` enabled (the
//! default), results from an older generation and fetches overtaken by a
//! newer applied fetch are dropped, and pending retries die with their
//! generation.

use rv_common::{ActiveTab, FetchError, ReportBundle, Selection};
use rv_render::{render_message, render_report_pane, DisplayRegion, ReportPane, FETCH_ERROR_MESSAGE};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::msg::{Cmd, Msg, Ticket};

/// What the display region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing selected, or selection incomplete.
    #[default]
    Empty,
    /// A fetch is outstanding; the region is cleared meanwhile.
    Loading,
    /// Bundle loaded.
    Loaded(ReportBundle),
    /// Generation requested; the last bundle (if any) stays visible except
    /// for its report pane.
    Generating { previous: Option<ReportBundle> },
    /// Generation failed; a retry fetch is scheduled.
    GenerateFailed {
        previous: Option<ReportBundle>,
        message: String,
    },
    /// Fetch failed.
    Error(String),
}

impl ViewState {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Empty => "empty",
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Generating { .. } => "generating",
            ViewState::GenerateFailed { .. } => "generate_failed",
            ViewState::Error(_) => "error",
        }
    }

    /// Bundle whose logs/specs are on screen, if any.
    pub fn bundle(&self) -> Option<&ReportBundle> {
        match self {
            ViewState::Loaded(bundle) => Some(bundle),
            ViewState::Generating { previous } | ViewState::GenerateFailed { previous, .. } => {
                previous.as_ref()
            }
            _ => None,
        }
    }
}

/// Client-side report session state machine.
#[derive(Debug, Clone, Default)]
pub struct ReportSession {
    config: SessionConfig,
    selection: Selection,
    view: ViewState,
    active_tab: ActiveTab,
    generation: u64,
    next_request: u64,
    last_applied: u64,
}

impl ReportSession {
    /// Create an idle session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    /// Current selection generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one message and return the side effects to perform.
    pub fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        debug!(msg = msg.name(), view = self.view.name(), "session update");
        match msg {
            Msg::SelectHost(host) => {
                self.selection.host = host;
                self.on_selection_changed()
            }
            Msg::SelectDate(date) => {
                self.selection.date = date;
                self.on_selection_changed()
            }
            Msg::Select(selection) => {
                self.selection = selection;
                self.on_selection_changed()
            }
            Msg::Refresh => self.fetch_report(),
            Msg::GenerateRequested => self.generate_report(),
            Msg::TabClicked(tab) => {
                self.switch_tab(tab);
                Vec::new()
            }
            Msg::ReportLoaded { ticket, result } => {
                self.on_report_loaded(ticket, result);
                Vec::new()
            }
            Msg::GenerateFinished { ticket, result } => self.on_generate_finished(ticket, result),
            Msg::RetryElapsed { ticket } => self.on_retry_elapsed(ticket),
        }
    }

    /// Markup of the display region for the current state.
    pub fn display(&self) -> String {
        let tab = self.active_tab;
        match &self.view {
            ViewState::Empty | ViewState::Loading => String::new(),
            ViewState::Error(message) => render_message(message),
            ViewState::Loaded(bundle) => DisplayRegion::from_bundle(bundle, tab).render(),
            ViewState::Generating { previous } => match previous {
                Some(bundle) => DisplayRegion::from_bundle(bundle, tab)
                    .with_report_pane(ReportPane::Generating)
                    .render(),
                None => render_report_pane(ReportPane::Generating),
            },
            ViewState::GenerateFailed { previous, message } => {
                let pane = ReportPane::GenerateFailed(message);
                match previous {
                    Some(bundle) => DisplayRegion::from_bundle(bundle, tab)
                        .with_report_pane(pane)
                        .render(),
                    None => render_report_pane(pane),
                }
            }
        }
    }

    fn on_selection_changed(&mut self) -> Vec<Cmd> {
        self.generation += 1;
        let Some(fragment) = self.selection.fragment() else {
            debug!(generation = self.generation, "selection incomplete, clearing display");
            self.view = ViewState::Empty;
            return Vec::new();
        };

        let mut cmds = vec![Cmd::SetFragment(fragment)];
        cmds.extend(self.fetch_report());
        cmds
    }

    fn fetch_report(&mut self) -> Vec<Cmd> {
        if !self.selection.is_complete() {
            self.view = ViewState::Empty;
            return Vec::new();
        }

        let ticket = self.issue_ticket();
        info!(
            host = %self.selection.host,
            date = %self.selection.date,
            request = ticket.request,
            "fetching report"
        );
        self.view = ViewState::Loading;
        vec![Cmd::FetchReport {
            ticket,
            selection: self.selection.clone(),
        }]
    }

    fn on_report_loaded(&mut self, ticket: Ticket, result: Result<ReportBundle, FetchError>) {
        if self.config.discard_stale_responses
            && (ticket.generation != self.generation || ticket.request <= self.last_applied)
        {
            debug!(
                request = ticket.request,
                generation = ticket.generation,
                current_generation = self.generation,
                "dropping stale report response"
            );
            return;
        }
        self.last_applied = self.last_applied.max(ticket.request);

        match result {
            Ok(bundle) => {
                info!(
                    host = %bundle.host,
                    date = %bundle.date,
                    has_report = bundle.has_report(),
                    "report loaded"
                );
                self.view = ViewState::Loaded(bundle);
                self.active_tab = ActiveTab::Report;
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "error fetching report data");
                self.view = ViewState::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    fn generate_report(&mut self) -> Vec<Cmd> {
        if !self.selection.is_complete() {
            debug!("generate ignored, selection incomplete");
            return Vec::new();
        }

        let previous = self.take_visible_bundle();
        self.view = ViewState::Generating { previous };
        let ticket = self.issue_ticket();
        info!(
            host = %self.selection.host,
            date = %self.selection.date,
            request = ticket.request,
            "generating report"
        );
        vec![Cmd::GenerateReport {
            ticket,
            selection: self.selection.clone(),
        }]
    }

    fn on_generate_finished(&mut self, ticket: Ticket, result: Result<(), FetchError>) -> Vec<Cmd> {
        if self.config.discard_stale_responses && ticket.generation != self.generation {
            debug!(request = ticket.request, "dropping generate result for previous selection");
            return Vec::new();
        }

        match result {
            Ok(()) => {
                info!(request = ticket.request, "report generated, refreshing");
                self.fetch_report()
            }
            Err(err) => {
                let delay = self.config.retry_delay();
                warn!(
                    kind = err.kind(),
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "report generation failed"
                );
                let previous = self.take_visible_bundle();
                self.view = ViewState::GenerateFailed {
                    previous,
                    message: err.to_string(),
                };
                vec![Cmd::ScheduleRetry { ticket, delay }]
            }
        }
    }

    fn on_retry_elapsed(&mut self, ticket: Ticket) -> Vec<Cmd> {
        if self.config.discard_stale_responses && ticket.generation != self.generation {
            debug!(request = ticket.request, "retry cancelled by selection change");
            return Vec::new();
        }
        self.fetch_report()
    }

    fn switch_tab(&mut self, tab: ActiveTab) {
        debug!(tab = %tab, "switching tab");
        self.active_tab = tab;
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_request += 1;
        Ticket {
            generation: self.generation,
            request: self.next_request,
        }
    }

    fn take_visible_bundle(&mut self) -> Option<ReportBundle> {
        match std::mem::take(&mut self.view) {
            ViewState::Loaded(bundle) => Some(bundle),
            ViewState::Generating { previous } | ViewState::GenerateFailed { previous, .. } => {
                previous
            }
            _ => None,
        }
    }
}
