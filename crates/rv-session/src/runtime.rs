//! Synchronous driver for [`ReportSession`].
//!
//! Performs the session's commands against a [`ReportSource`], feeds the
//! results back as messages and keeps retry timers on a [`Clock`]. Requests
//! run inline on the caller's thread, so a dispatch returns only once every
//! follow-up message it caused has been applied.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::msg::{Cmd, Msg, Ticket};
use crate::session::ReportSession;
use crate::source::ReportSource;

/// Time source for retry timers.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block until `duration` has passed on this clock.
    fn sleep(&self, duration: Duration);
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to. Sleeping advances it instantly.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }

    /// Total time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingRetry {
    deadline: Instant,
    ticket: Ticket,
}

/// Runs a [`ReportSession`] against a source and a clock.
pub struct SessionRuntime<S, C = SystemClock> {
    session: ReportSession,
    source: S,
    clock: C,
    fragment: Option<String>,
    timers: Vec<PendingRetry>,
}

impl<S: ReportSource> SessionRuntime<S, SystemClock> {
    /// Runtime on the wall clock.
    pub fn new(session: ReportSession, source: S) -> Self {
        Self::with_clock(session, source, SystemClock)
    }
}

impl<S: ReportSource, C: Clock> SessionRuntime<S, C> {
    pub fn with_clock(session: ReportSession, source: S, clock: C) -> Self {
        Self {
            session,
            source,
            clock,
            fragment: None,
            timers: Vec::new(),
        }
    }

    pub fn session(&self) -> &ReportSession {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Last address fragment written by the session.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Current display-region markup.
    pub fn display(&self) -> String {
        self.session.display()
    }

    /// Number of scheduled, not yet fired retries.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest retry deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Apply `msg` and every message that results from performing its
    /// commands.
    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            for cmd in self.session.update(msg) {
                if let Some(reply) = self.perform(cmd) {
                    queue.push_back(reply);
                }
            }
        }
    }

    /// Fire every retry whose deadline has passed, oldest first. Returns
    /// how many fired.
    pub fn fire_due_timers(&mut self) -> usize {
        let now = self.clock.now();
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.deadline);

        let fired = due.len();
        for timer in due {
            self.dispatch(Msg::RetryElapsed {
                ticket: timer.ticket,
            });
        }
        fired
    }

    /// Sleep through and fire timers until none remain.
    pub fn settle(&mut self) {
        while let Some(deadline) = self.next_deadline() {
            let now = self.clock.now();
            if deadline > now {
                self.clock.sleep(deadline - now);
            }
            self.fire_due_timers();
        }
    }

    fn perform(&mut self, cmd: Cmd) -> Option<Msg> {
        match cmd {
            Cmd::SetFragment(fragment) => {
                debug!(%fragment, "address fragment updated");
                self.fragment = Some(fragment);
                None
            }
            Cmd::FetchReport { ticket, selection } => Some(Msg::ReportLoaded {
                ticket,
                result: self.source.fetch_report(&selection),
            }),
            Cmd::GenerateReport { ticket, selection } => Some(Msg::GenerateFinished {
                ticket,
                result: self.source.generate_report(&selection),
            }),
            Cmd::ScheduleRetry { ticket, delay } => {
                debug!(
                    request = ticket.request,
                    delay_ms = delay.as_millis() as u64,
                    "retry scheduled"
                );
                self.timers.push(PendingRetry {
                    deadline: self.clock.now() + delay,
                    ticket,
                });
                None
            }
        }
    }
}
