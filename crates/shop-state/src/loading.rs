//! Loading indicator with a minimum display time.
//!
//! Fast requests would otherwise make the indicator flash. Once shown, it
//! stays visible for at least `min_display`; a `hide()` arriving earlier is
//! deferred by a tokio timer. Dropping the indicator cancels that timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

use crate::slice::SliceState;

/// Default minimum display time.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct LoadingIndicator {
    min_display: Duration,
    visible: Arc<watch::Sender<bool>>,
    shown_at: Mutex<Option<Instant>>,
    pending_hide: Mutex<Option<JoinHandle<()>>>,
}

impl LoadingIndicator {
    pub fn new(min_display: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            min_display,
            visible: Arc::new(tx),
            shown_at: Mutex::new(None),
            pending_hide: Mutex::new(None),
        }
    }

    pub fn min_display(&self) -> Duration {
        self.min_display
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// Show the indicator. Cancels a deferred hide; a second `show` while
    /// visible keeps the original start time.
    pub fn show(&self) {
        self.cancel_pending();
        let mut shown_at = lock(&self.shown_at);
        if !self.is_visible() || shown_at.is_none() {
            *shown_at = Some(Instant::now());
        }
        self.visible.send_replace(true);
    }

    /// Hide the indicator, or schedule hiding once `min_display` has passed
    /// since `show`. Must be called inside a tokio runtime.
    pub fn hide(&self) {
        if !self.is_visible() {
            return;
        }
        let elapsed = lock(&self.shown_at)
            .map(|at| at.elapsed())
            .unwrap_or(self.min_display);

        if elapsed >= self.min_display {
            self.hide_now();
            return;
        }

        let remaining = self.min_display - elapsed;
        trace!(remaining_ms = remaining.as_millis() as u64, "deferring hide");
        let deadline = Instant::now() + remaining;
        let visible = Arc::clone(&self.visible);
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            visible.send_replace(false);
        });
        if let Some(previous) = lock(&self.pending_hide).replace(handle) {
            previous.abort();
        }
    }

    /// Mirror a slice's loading flag until the slice is dropped.
    pub fn follow<T>(self: &Arc<Self>, mut slice: watch::Receiver<SliceState<T>>) -> JoinHandle<()>
    where
        T: Send + Sync + 'static,
    {
        let indicator = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let loading = slice.borrow_and_update().is_loading();
                if loading {
                    indicator.show();
                } else {
                    indicator.hide();
                }
                if slice.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    fn hide_now(&self) {
        *lock(&self.shown_at) = None;
        self.visible.send_replace(false);
    }

    fn cancel_pending(&self) {
        if let Some(handle) = lock(&self.pending_hide).take() {
            handle.abort();
        }
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISPLAY)
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
