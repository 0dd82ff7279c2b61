//! Cancellable debounce timer.
//!
//! Noisy inputs (the search box) schedule their effect through a
//! [`Debouncer`]; re-arming supersedes the previously scheduled run, and
//! dropping the debouncer cancels outstanding work so a stale update can
//! never fire after its owner is gone.

use std::time::Duration;

use tokio::task::AbortHandle;

/// Quiet window applied to search input before it affects fetches.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delays an action until a quiet period has elapsed.
///
/// Must be used from within a tokio runtime; each armed action runs on a
/// spawned task after [`Duration`] of quiet.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to run after the quiet window, cancelling any
    /// previously scheduled action that has not yet fired.
    pub fn call<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        // Fix the deadline now: `sleep` resolves its start time when the
        // spawned task is first polled, which drifts the quiet window.
        let deadline = tokio::time::Instant::now() + self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action();
        });
        self.pending = Some(task.abort_handle());
    }

    /// Cancel the pending action, if any. Safe to call when nothing is
    /// scheduled or the action already ran.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while an action is scheduled but has not yet fired.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
