//! # Actions
//!
//! Everything that can happen in Vocab becomes an `Action`.
//! User presses Enter in the add box? That's `Action::AddEntry(text)`.
//! The quiz timer runs out? That's `Action::DeadlineElapsed(session_id)`.
//!
//! The `update()` function takes the current state and an action, applies
//! it, and returns an `Effect` telling the adapter what to do next.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Errors never escape `update()`: they end up in `status_message`.

use std::path::PathBuf;

use log::{debug, warn};
use uuid::Uuid;

use crate::core::error::VocabError;
use crate::core::quiz::{EndReason, SessionSummary};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddEntry(String),
    /// Delete by list index (already confirmed).
    DeleteEntry(usize),
    SetNewEntryTag(String),
    CycleFilter,
    StartTest,
    SubmitAnswer(String),
    /// Stop the running test (already confirmed).
    StopTest,
    DeadlineElapsed(Uuid),
    /// Pronounce the entry at this list index, or the quiz word when `None`.
    Speak(Option<usize>),
    ToggleTheme,
    Import(String),
    Export(PathBuf),
    Quit,
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The submitted text was consumed; clear the input box.
    ClearInput,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::AddEntry(raw) => match app.add_entry(&raw) {
            Ok(()) => {
                app.status_message = format!("Added ({} words)", app.store.len());
                Effect::ClearInput
            }
            Err(VocabError::StorageUnavailable(e)) => {
                app.status_message = format!("Added, but {}", VocabError::StorageUnavailable(e));
                Effect::ClearInput
            }
            Err(e) => report(app, e),
        },
        Action::DeleteEntry(index) => match app.delete_entry(index) {
            Ok(removed) => {
                app.status_message = format!("Deleted \"{}\"", removed.word);
                Effect::None
            }
            Err(e) => report(app, e),
        },
        Action::SetNewEntryTag(tag) => match app.set_new_entry_tag(&tag) {
            Ok(()) => {
                app.status_message = format!("New words tagged \"{}\"", app.new_entry_tag);
                Effect::ClearInput
            }
            Err(e) => report(app, e),
        },
        Action::CycleFilter => match app.cycle_filter() {
            Ok(filter) => {
                let label = filter.label().to_string();
                app.status_message = format!("Filter: {} ({} words)", label, app.view().len());
                Effect::None
            }
            Err(e) => report(app, e),
        },
        Action::StartTest => match app.start_test() {
            Ok(()) => {
                app.status_message = match app.time_limit {
                    Some(limit) => format!("Test started ({}s)", limit.as_secs()),
                    None => "Test started".to_string(),
                };
                Effect::ClearInput
            }
            Err(e) => report(app, e),
        },
        Action::SubmitAnswer(text) => match app.submit_answer(&text) {
            Ok(outcome) => {
                app.status_message = match (&outcome.finished, outcome.correct) {
                    (Some(summary), _) => summary_message(summary),
                    (None, true) => "Correct!".to_string(),
                    (None, false) => format!("Wrong, it was \"{}\"", outcome.expected),
                };
                Effect::ClearInput
            }
            Err(e) => report(app, e),
        },
        Action::StopTest => match app.stop_test() {
            Ok(summary) => {
                app.status_message = summary_message(&summary);
                Effect::ClearInput
            }
            Err(e) => report(app, e),
        },
        Action::DeadlineElapsed(id) => {
            if let Some(summary) = app.deadline_elapsed(id) {
                app.status_message = summary_message(&summary);
                return Effect::ClearInput;
            }
            Effect::None
        }
        Action::Speak(Some(index)) => {
            if let Some(entry) = app.store.all().get(index) {
                app.speak(entry);
            }
            Effect::None
        }
        Action::Speak(None) => {
            app.speak_current();
            Effect::None
        }
        Action::ToggleTheme => match app.toggle_theme() {
            Ok(dark) => {
                app.status_message = if dark { "Dark theme" } else { "Light theme" }.to_string();
                Effect::None
            }
            Err(e) => report(app, e),
        },
        Action::Import(text) => match app.import_text(&text) {
            Ok(count) => {
                app.status_message = format!("Imported {} words", count);
                Effect::None
            }
            Err(e) => report(app, e),
        },
        Action::Export(dir) => {
            match app.export_to_dir(&dir) {
                Ok(path) => app.status_message = format!("Exported to {}", path.display()),
                Err(e) => {
                    warn!("Export failed: {}", e);
                    app.status_message = format!("Export failed: {}", e);
                }
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn report(app: &mut App, error: VocabError) -> Effect {
    warn!("{}", error);
    app.status_message = error.to_string();
    Effect::None
}

/// Status line for a finished test, e.g. `Time's up! Score: 3/10`.
pub fn summary_message(summary: &SessionSummary) -> String {
    let prefix = match summary.reason {
        EndReason::Completed => "Test complete!",
        EndReason::Stopped => "Test stopped.",
        EndReason::TimedOut => "Time's up!",
    };
    format!("{} Score: {}/{}", prefix, summary.score, summary.total)
}
