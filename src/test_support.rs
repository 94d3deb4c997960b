//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;

use crate::core::audio::{AudioSink, Sound};
use crate::core::state::App;
use crate::core::storage::MemoryStore;
use crate::core::timer::{DeadlineScheduler, DeadlineTimer};

/// Remembers every sound instead of playing it.
#[derive(Default)]
pub struct RecordingAudio {
    played: Mutex<Vec<Sound>>,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<Sound> {
        self.played.lock().unwrap().clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&self, sound: Sound) {
        self.played.lock().unwrap().push(sound);
    }
}

/// Records schedule and cancel calls. Tests fire deadlines by hand with
/// `App::deadline_elapsed`.
#[derive(Default)]
pub struct ManualScheduler {
    scheduled: Mutex<Vec<(Uuid, Duration)>>,
    cancelled: Arc<Mutex<Vec<Uuid>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<(Uuid, Duration)> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<Uuid> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl DeadlineScheduler for ManualScheduler {
    fn schedule(&self, session_id: Uuid, after: Duration) -> DeadlineTimer {
        self.scheduled.lock().unwrap().push((session_id, after));
        let cancelled = self.cancelled.clone();
        DeadlineTimer::new(move || cancelled.lock().unwrap().push(session_id))
    }
}

/// Creates an untimed test App over an in-memory store.
pub fn test_app() -> App {
    test_app_with(None).0
}

/// Creates a test App with the given time limit, returning the fakes so
/// tests can inspect them.
pub fn test_app_with(
    time_limit: Option<Duration>,
) -> (App, Arc<RecordingAudio>, Arc<ManualScheduler>) {
    let audio = Arc::new(RecordingAudio::default());
    let scheduler = Arc::new(ManualScheduler::new());
    let mut app = App::new(Arc::new(MemoryStore::new()), audio.clone(), scheduler.clone());
    app.time_limit = time_limit;
    (app, audio, scheduler)
}
