//! # Quiz Session
//!
//! ```text
//!            start_test (view non-empty)
//!   Adding ───────────────────────────────▶ Testing
//!     ▲                                       │ submit_answer
//!     │   last answer / stop_test / deadline  │ (position += 1)
//!     └───────────────────────────────────────┘
//! ```
//!
//! The session only exists inside `Mode::Testing`, so there is no way to ask
//! for a current entry without one. A session knows positions and counts;
//! which entry sits at a position is the filtered view's business.

use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use log::debug;
use uuid::Uuid;

use crate::core::error::VocabError;
use crate::core::timer::{DeadlineScheduler, DeadlineTimer};

#[derive(Debug, Default)]
pub enum Mode {
    #[default]
    Adding,
    Testing(QuizSession),
}

impl Mode {
    pub fn is_testing(&self) -> bool {
        matches!(self, Mode::Testing(_))
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            Mode::Testing(session) => Some(session),
            Mode::Adding => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Adding => "Adding",
            Mode::Testing(_) => "Testing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every question was answered.
    Completed,
    /// The user stopped early.
    Stopped,
    /// The time limit ran out.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub total: usize,
    pub reason: EndReason,
}

/// What an answer did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// That was the last question.
    Exhausted,
}

#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    position: usize,
    score: u32,
    total: usize,
    deadline: Option<DateTime<Local>>,
    timer: Option<DeadlineTimer>,
}

impl QuizSession {
    /// Starts a session over `total` questions. A `time_limit` schedules a
    /// deadline whose handle the session keeps.
    pub fn start(
        total: usize,
        time_limit: Option<Duration>,
        scheduler: &dyn DeadlineScheduler,
    ) -> Result<Self, VocabError> {
        if total == 0 {
            return Err(VocabError::EmptyList);
        }
        let id = Uuid::new_v4();
        let (deadline, timer) = match time_limit {
            Some(limit) => (
                TimeDelta::from_std(limit)
                    .ok()
                    .and_then(|delta| Local::now().checked_add_signed(delta)),
                Some(scheduler.schedule(id, limit)),
            ),
            None => (None, None),
        };
        debug!("Session {} started: {} questions, limit {:?}", id, total, time_limit);
        Ok(Self {
            id,
            position: 0,
            score: 0,
            total,
            deadline,
            timer,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn deadline(&self) -> Option<DateTime<Local>> {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self, now: DateTime<Local>) -> Option<Duration> {
        self.deadline
            .map(|deadline| (deadline - now).to_std().unwrap_or(Duration::ZERO))
    }

    /// Scores the answer for the current question and moves on.
    pub fn record_answer(&mut self, correct: bool) -> Advance {
        if correct {
            self.score += 1;
        }
        if self.position + 1 < self.total {
            self.position += 1;
            Advance::Next
        } else {
            Advance::Exhausted
        }
    }

    /// Ends the session, cancelling any pending deadline.
    pub fn finish(mut self, reason: EndReason) -> SessionSummary {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        SessionSummary {
            score: self.score,
            total: self.total,
            reason,
        }
    }
}

/// Answers are compared trimmed and case-folded.
pub fn answer_matches(answer: &str, expected: &str) -> bool {
    normalize(answer) == normalize(expected)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
