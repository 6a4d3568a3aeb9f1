//! Request progress signalling.
//!
//! Every request emits one `started` and exactly one `finished` event. The
//! `finished` event is sent from a drop guard, so it fires on success, on
//! failure, and when the request future is dropped mid-flight.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::Method;

/// What a progress event is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Client-local, monotonically increasing request number.
    pub id: u64,
    pub method: Method,
    pub url: String,
}

/// How a request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered with this status (2xx or not).
    Status(u16),
    /// No response: transport failure or unreadable body.
    Failed,
    /// The request future was dropped before it settled.
    Cancelled,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Status(s) if (200..300).contains(s))
    }
}

/// Receives request start/end notifications (e.g. to drive a spinner).
pub trait ProgressSink: Send + Sync {
    fn started(&self, request: &RequestInfo);
    fn finished(&self, request: &RequestInfo, outcome: Outcome);
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn started(&self, _request: &RequestInfo) {}
    fn finished(&self, _request: &RequestInfo, _outcome: Outcome) {}
}

/// Counts requests; `is_busy` is what a global progress bar would show.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    in_flight: AtomicUsize,
    started: AtomicU64,
    finished: AtomicU64,
    failed: AtomicU64,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn started_count(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished_count(&self) -> u64 {
        self.finished.load(Ordering::SeqCst)
    }

    /// Finished requests that did not end in a 2xx.
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }
}

impl ProgressSink for ProgressCounter {
    fn started(&self, _request: &RequestInfo) {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    fn finished(&self, _request: &RequestInfo, outcome: Outcome) {
        self.finished.fetch_add(1, Ordering::SeqCst);
        if !outcome.is_success() {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
        // saturating: a misbehaving caller must not wrap the gauge
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)));
    }
}

/// Emits `started` on creation and `finished` on drop.
pub(crate) struct ProgressGuard {
    sink: Arc<dyn ProgressSink>,
    request: RequestInfo,
    outcome: Option<Outcome>,
}

impl ProgressGuard {
    pub(crate) fn start(sink: Arc<dyn ProgressSink>, request: RequestInfo) -> Self {
        sink.started(&request);
        Self {
            sink,
            request,
            outcome: None,
        }
    }

    pub(crate) fn settle(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        let outcome = self.outcome.unwrap_or(Outcome::Cancelled);
        self.sink.finished(&self.request, outcome);
    }
}
