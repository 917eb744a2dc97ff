//! Debounced callbacks
//!
//! Used to rate-limit search-triggered fetches: a burst of keystrokes
//! results in a single call with the final query.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delays a callback until calls stop arriving for `delay`
///
/// Each [`call`](Debouncer::call) cancels the pending run and schedules a
/// new one with the latest arguments. Must be used from within a tokio
/// runtime.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    /// Schedule the callback with `args`, replacing any pending run
    pub fn call(&mut self, args: T) {
        self.cancel();

        let callback = self.callback.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// Drop the pending run, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
