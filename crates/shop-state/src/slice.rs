//! Independently owned partitions of client state.
//!
//! A [`Slice`] holds one resource's cached data plus its loading and error
//! flags. It is only changed through a narrow contract:
//!
//! - [`Slice::begin`] marks a request in flight and hands out a [`Ticket`],
//! - [`Slice::replace_data`] / [`Slice::update_data`] settle a ticket with data
//!   and clear the error,
//! - [`Slice::set_error`] settles a ticket with an error and keeps the data
//!   (stale-while-error).
//!
//! Observers hold a `watch::Receiver` and see every change.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// What to do with a response that settles after a newer request's response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Whatever settles last wins, even if it was issued first.
    #[default]
    LastSettled,
    /// Responses older than the last accepted one are dropped.
    LatestIssued,
}

/// Snapshot of a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceState<T> {
    data: Option<T>,
    error: Option<String>,
    in_flight: u32,
    accepted_seq: u64,
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: 0,
            accepted_seq: 0,
        }
    }
}

/// The one signal a view should act on. Loading beats error, error beats data.
#[derive(Debug, PartialEq)]
pub enum SliceStatus<'a, T> {
    Idle,
    Loading,
    Failed(&'a str),
    Ready(&'a T),
}

impl<T> SliceState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Requests begun and not yet settled.
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    /// Sequence number of the request whose outcome the slice currently shows.
    pub fn accepted_seq(&self) -> u64 {
        self.accepted_seq
    }

    pub fn status(&self) -> SliceStatus<'_, T> {
        if self.is_loading() {
            SliceStatus::Loading
        } else if let Some(error) = &self.error {
            SliceStatus::Failed(error)
        } else if let Some(data) = &self.data {
            SliceStatus::Ready(data)
        } else {
            SliceStatus::Idle
        }
    }
}

/// Proof that a request was begun against a slice.
///
/// Settling consumes it. A ticket dropped unsettled (its action future was
/// dropped) still clears its share of the loading flag.
#[must_use = "settle the ticket with replace_data or set_error"]
pub struct Ticket<'a, T> {
    slice: &'a Slice<T>,
    seq: u64,
    settled: bool,
}

impl<T> Ticket<'_, T> {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl<T> Drop for Ticket<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.slice.tx.send_modify(|state| {
                state.in_flight = state.in_flight.saturating_sub(1);
            });
        }
    }
}

/// One resource's cached state.
pub struct Slice<T> {
    name: &'static str,
    ordering: ResponseOrdering,
    next_seq: AtomicU64,
    tx: watch::Sender<SliceState<T>>,
}

impl<T> Slice<T> {
    pub fn new(name: &'static str, ordering: ResponseOrdering) -> Self {
        let (tx, _rx) = watch::channel(SliceState::default());
        Self {
            name,
            ordering,
            next_seq: AtomicU64::new(1),
            tx,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Observe this slice.
    pub fn subscribe(&self) -> watch::Receiver<SliceState<T>> {
        self.tx.subscribe()
    }

    /// Mark a request in flight.
    pub fn begin(&self) -> Ticket<'_, T> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|state| state.in_flight += 1);
        Ticket {
            slice: self,
            seq,
            settled: false,
        }
    }

    /// Settle with fresh data: replaces the data and clears the error.
    ///
    /// Returns `false` if the response was discarded as stale.
    pub fn replace_data(&self, ticket: Ticket<'_, T>, data: T) -> bool {
        self.update_data(ticket, |_| data)
    }

    /// Settle with data derived from the previous value.
    pub fn update_data(&self, mut ticket: Ticket<'_, T>, f: impl FnOnce(Option<&T>) -> T) -> bool {
        ticket.settled = true;
        let seq = ticket.seq;
        let mut accepted = false;
        self.tx.send_modify(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            if self.is_stale(seq, state) {
                return;
            }
            let next = f(state.data.as_ref());
            state.data = Some(next);
            state.error = None;
            state.accepted_seq = seq;
            accepted = true;
        });
        if !accepted {
            debug!(slice = self.name, seq, "discarded stale response");
        }
        accepted
    }

    /// Settle with an error. Prior data is kept.
    pub fn set_error(&self, mut ticket: Ticket<'_, T>, error: impl Into<String>) -> bool {
        ticket.settled = true;
        let seq = ticket.seq;
        let error = error.into();
        let mut accepted = false;
        self.tx.send_modify(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            if self.is_stale(seq, state) {
                return;
            }
            state.error = Some(error);
            state.accepted_seq = seq;
            accepted = true;
        });
        if !accepted {
            debug!(slice = self.name, seq, "discarded stale error");
        }
        accepted
    }

    /// Local, non-fetch change to the cached value (e.g. a user choice).
    ///
    /// `f` reports whether it changed anything; subscribers are only woken
    /// when it did. Returns that report.
    pub fn mutate(&self, f: impl FnOnce(&mut Option<T>) -> bool) -> bool {
        self.tx.send_if_modified(|state| f(&mut state.data))
    }

    /// Drop cached data and error; requests in flight still count.
    pub fn clear(&self) {
        self.tx.send_modify(|state| {
            state.data = None;
            state.error = None;
        });
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    fn is_stale(&self, seq: u64, state: &SliceState<T>) -> bool {
        self.ordering == ResponseOrdering::LatestIssued && seq < state.accepted_seq
    }
}

impl<T: Clone> Slice<T> {
    /// Clone of the current state.
    pub fn snapshot(&self) -> SliceState<T> {
        self.tx.borrow().clone()
    }

    /// Clone of the cached data.
    pub fn data(&self) -> Option<T> {
        self.tx.borrow().data.clone()
    }
}

impl<T> std::fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.tx.borrow();
        f.debug_struct("Slice")
            .field("name", &self.name)
            .field("ordering", &self.ordering)
            .field("in_flight", &state.in_flight)
            .field("has_data", &state.data.is_some())
            .field("error", &state.error)
            .finish()
    }
}
