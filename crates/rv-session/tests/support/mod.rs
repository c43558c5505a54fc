//! Shared helpers for session integration tests.
//!
//! `RecordingSource` is a scripted [`ReportSource`]: every call is logged and
//! answered from a queue, falling back to a default bundle/outcome once the
//! queue is empty.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use rv_common::{FetchError, ReportBundle, Selection};
use rv_session::ReportSource;

/// One observed call on the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(Selection),
    Generate(Selection),
}

#[derive(Default)]
pub struct RecordingSource {
    calls: RefCell<Vec<Call>>,
    fetches: RefCell<VecDeque<Result<ReportBundle, FetchError>>>,
    generates: RefCell<VecDeque<Result<(), FetchError>>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next fetch.
    pub fn push_fetch(&self, result: Result<ReportBundle, FetchError>) -> &Self {
        self.fetches.borrow_mut().push_back(result);
        self
    }

    /// Queue the answer for the next generate.
    pub fn push_generate(&self, result: Result<(), FetchError>) -> &Self {
        self.generates.borrow_mut().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Fetch(_)))
            .count()
    }

    pub fn generate_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Generate(_)))
            .count()
    }
}

impl ReportSource for RecordingSource {
    fn fetch_report(&self, selection: &Selection) -> Result<ReportBundle, FetchError> {
        self.calls.borrow_mut().push(Call::Fetch(selection.clone()));
        self.fetches
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(bundle_for(selection, "")))
    }

    fn generate_report(&self, selection: &Selection) -> Result<(), FetchError> {
        self.calls.borrow_mut().push(Call::Generate(selection.clone()));
        self.generates.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

/// Bundle for `selection` with fixed logs/specs and the given report.
pub fn bundle_for(selection: &Selection, report: &str) -> ReportBundle {
    ReportBundle {
        host: selection.host.clone(),
        date: selection.date.clone(),
        report: report.to_string(),
        logs: format!("{} kernel: eth0 link up", selection.host),
        specs: "cpu: 8 cores".to_string(),
    }
}
