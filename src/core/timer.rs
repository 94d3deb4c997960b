//! # Deadline Timer
//!
//! A timed quiz schedules one deadline when it starts. The session keeps the
//! returned [`DeadlineTimer`] and cancels it on every other way out, so a
//! stale expiry never reaches a newer session. Cancelling twice, or after
//! the timer already fired, does nothing.
//!
//! ```text
//! start_test ──schedule(id, limit)──▶ tokio task: sleep(limit)
//!                                            │
//!     event loop ◀── Action::DeadlineElapsed(id) (mpsc)
//! ```

use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use log::{debug, warn};
use uuid::Uuid;

use crate::core::action::Action;

pub trait DeadlineScheduler: Send + Sync {
    /// Arranges for session `session_id` to be told its time is up after `after`.
    fn schedule(&self, session_id: Uuid, after: Duration) -> DeadlineTimer;
}

/// Handle to a scheduled deadline. Dropping it cancels the deadline.
pub struct DeadlineTimer {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl DeadlineTimer {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing behind it.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_live(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for DeadlineTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeadlineTimer")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Sleeps on the tokio runtime and posts `Action::DeadlineElapsed` back to
/// the event loop.
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
    tx: mpsc::Sender<Action>,
}

impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle, tx: mpsc::Sender<Action>) -> Self {
        Self { runtime, tx }
    }
}

impl DeadlineScheduler for TokioScheduler {
    fn schedule(&self, session_id: Uuid, after: Duration) -> DeadlineTimer {
        let tx = self.tx.clone();
        debug!("Scheduling deadline for session {} in {:?}", session_id, after);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(Action::DeadlineElapsed(session_id)).is_err() {
                warn!("Deadline for session {} fired after the event loop closed", session_id);
            }
        });
        let abort = handle.abort_handle();
        DeadlineTimer::new(move || abort.abort())
    }
}

/// Never fires. For contexts without a running quiz loop (batch commands).
pub struct NoopScheduler;

impl DeadlineScheduler for NoopScheduler {
    fn schedule(&self, _session_id: Uuid, _after: Duration) -> DeadlineTimer {
        DeadlineTimer::inert()
    }
}
