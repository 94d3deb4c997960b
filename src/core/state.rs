//! # Application State
//!
//! Core business state for Vocab. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: EntryStore              // vocabulary list (persisted)
//! ├── history: HistoryLog            // past scores (persisted)
//! ├── prefs: Preferences             // dark/light (persisted)
//! ├── mode: Mode                     // Adding | Testing(QuizSession)
//! ├── filter: TagFilter              // which tag the quiz runs over
//! ├── new_entry_tag: String          // tag given to added words
//! ├── time_limit: Option<Duration>   // None = untimed
//! ├── speak_words: bool              // pronounce prompts
//! ├── status_message: String         // status bar text
//! ├── last_summary: Option<...>      // result of the last finished test
//! ├── audio: Arc<dyn AudioSink>      // speech + cues
//! └── scheduler: Arc<dyn DeadlineScheduler>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs
//! (or, for batch commands, the operation methods below).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::audio::{AudioSink, Sound};
use crate::core::codec;
use crate::core::config::ResolvedConfig;
use crate::core::entry::{DEFAULT_TAG, VocabEntry, parse, validate_tag};
use crate::core::error::VocabError;
use crate::core::filter::{TagFilter, filtered};
use crate::core::history::{HistoryLog, HistoryRecord};
use crate::core::prefs::Preferences;
use crate::core::quiz::{Advance, EndReason, Mode, QuizSession, SessionSummary, answer_matches};
use crate::core::storage::KeyValueStore;
use crate::core::store::EntryStore;
use crate::core::timer::DeadlineScheduler;

/// Result of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: String,
    /// Set when that answer was the last question.
    pub finished: Option<SessionSummary>,
}

pub struct App {
    pub store: EntryStore,
    pub history: HistoryLog,
    pub prefs: Preferences,
    pub mode: Mode,
    pub filter: TagFilter,
    pub new_entry_tag: String,
    pub time_limit: Option<Duration>,
    pub speak_words: bool,
    pub status_message: String,
    pub last_summary: Option<SessionSummary>,
    audio: Arc<dyn AudioSink>,
    scheduler: Arc<dyn DeadlineScheduler>,
}

impl App {
    /// Loads saved state from `storage`. Untimed, speech on, no filter.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        audio: Arc<dyn AudioSink>,
        scheduler: Arc<dyn DeadlineScheduler>,
    ) -> Self {
        Self {
            store: EntryStore::load(storage.clone()),
            history: HistoryLog::load(storage.clone()),
            prefs: Preferences::load(storage),
            mode: Mode::Adding,
            filter: TagFilter::All,
            new_entry_tag: DEFAULT_TAG.to_string(),
            time_limit: None,
            speak_words: true,
            status_message: String::from("Welcome to Vocab!"),
            last_summary: None,
            audio,
            scheduler,
        }
    }

    pub fn from_config(
        config: &ResolvedConfig,
        storage: Arc<dyn KeyValueStore>,
        audio: Arc<dyn AudioSink>,
        scheduler: Arc<dyn DeadlineScheduler>,
    ) -> Self {
        let mut app = Self::new(storage, audio, scheduler);
        app.filter = config.initial_filter.clone();
        app.new_entry_tag = config.default_tag.clone();
        app.time_limit = config.time_limit;
        app.speak_words = config.speak_words;
        app
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The filtered view, recomputed on every call.
    pub fn view(&self) -> Vec<&VocabEntry> {
        filtered(self.store.all(), &self.filter)
    }

    pub fn is_testing(&self) -> bool {
        self.mode.is_testing()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.mode.session()
    }

    /// The entry being asked, while testing.
    pub fn current_entry(&self) -> Option<&VocabEntry> {
        let session = self.mode.session()?;
        self.view().get(session.position()).copied()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Parses `raw` and appends it under the current new-entry tag.
    pub fn add_entry(&mut self, raw: &str) -> Result<(), VocabError> {
        let tag = self.new_entry_tag.clone();
        self.add_entry_tagged(raw, &tag)
    }

    pub fn add_entry_tagged(&mut self, raw: &str, tag: &str) -> Result<(), VocabError> {
        self.ensure_adding()?;
        let entry = parse(raw, tag)?;
        info!("Adding entry {:?} [{}]", entry.word, entry.tag);
        self.store.add(entry)
    }

    /// Deletes by list index. Callers confirm with the user first.
    pub fn delete_entry(&mut self, index: usize) -> Result<VocabEntry, VocabError> {
        self.ensure_adding()?;
        let removed = self.store.delete_at(index)?;
        info!("Deleted entry {:?}", removed.word);
        Ok(removed)
    }

    pub fn set_new_entry_tag(&mut self, tag: &str) -> Result<(), VocabError> {
        self.new_entry_tag = validate_tag(tag)?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: TagFilter) -> Result<(), VocabError> {
        self.ensure_adding()?;
        self.filter = filter;
        Ok(())
    }

    pub fn cycle_filter(&mut self) -> Result<&TagFilter, VocabError> {
        let next = self.filter.next(&self.store.tags());
        self.set_filter(next)?;
        Ok(&self.filter)
    }

    /// Appends every entry in `text` (`entry|tag` lines). Returns the count.
    pub fn import_text(&mut self, text: &str) -> Result<usize, VocabError> {
        self.ensure_adding()?;
        let entries = codec::import(text);
        let count = self.store.extend(entries)?;
        info!("Imported {} entries", count);
        Ok(count)
    }

    pub fn export_text(&self) -> String {
        codec::export(self.store.all())
    }

    pub fn export_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        codec::export_to_dir(self.store.all(), dir)
    }

    pub fn toggle_theme(&mut self) -> Result<bool, VocabError> {
        self.prefs.toggle_dark_mode()
    }

    // ------------------------------------------------------------------
    // Quiz
    // ------------------------------------------------------------------

    pub fn start_test(&mut self) -> Result<(), VocabError> {
        self.ensure_adding()?;
        let total = self.view().len();
        let session = QuizSession::start(total, self.time_limit, self.scheduler.as_ref())?;
        info!(
            "Test started: {} questions, filter {}, limit {:?}",
            total,
            self.filter.label(),
            self.time_limit
        );
        self.mode = Mode::Testing(session);
        self.last_summary = None;
        self.speak_current();
        Ok(())
    }

    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, VocabError> {
        let expected = self
            .current_entry()
            .map(|entry| entry.meaning.clone())
            .ok_or(VocabError::NotTesting)?;
        let correct = answer_matches(answer, &expected);

        let Mode::Testing(session) = &mut self.mode else {
            return Err(VocabError::NotTesting);
        };
        let advance = session.record_answer(correct);
        debug!("Answer {:?} vs {:?}: correct={}", answer.trim(), expected, correct);

        self.audio
            .play(if correct { Sound::Correct } else { Sound::Incorrect });

        let finished = match advance {
            Advance::Next => {
                self.speak_current();
                None
            }
            Advance::Exhausted => self.end_session(EndReason::Completed),
        };
        Ok(AnswerOutcome {
            correct,
            expected,
            finished,
        })
    }

    /// Ends the running test early. Callers confirm with the user first.
    pub fn stop_test(&mut self) -> Result<SessionSummary, VocabError> {
        self.end_session(EndReason::Stopped)
            .ok_or(VocabError::NotTesting)
    }

    /// Handles a deadline expiry. Returns `None` when it belongs to a
    /// session that has already ended.
    pub fn deadline_elapsed(&mut self, session_id: uuid::Uuid) -> Option<SessionSummary> {
        let is_current = self
            .mode
            .session()
            .is_some_and(|session| session.id() == session_id);
        if !is_current {
            info!("Ignoring stale deadline for session {}", session_id);
            return None;
        }
        self.end_session(EndReason::TimedOut)
    }

    /// Pronounces the current quiz word, if speech is on and a test is running.
    pub fn speak_current(&self) {
        if let Some(entry) = self.current_entry() {
            self.speak(entry);
        }
    }

    pub fn speak(&self, entry: &VocabEntry) {
        if self.speak_words {
            self.audio.play(Sound::Word(entry.word.clone()));
        }
    }

    /// Leaves `Testing`, recording the result. `None` if no test was running.
    fn end_session(&mut self, reason: EndReason) -> Option<SessionSummary> {
        let Mode::Testing(session) = std::mem::take(&mut self.mode) else {
            return None;
        };
        let summary = session.finish(reason);
        info!(
            "Test ended ({:?}): {}/{}",
            summary.reason, summary.score, summary.total
        );

        let record = HistoryRecord::today(summary.score, summary.total as u32);
        if let Err(e) = self.history.append(record) {
            warn!("Failed to save score history: {}", e);
        }
        self.last_summary = Some(summary);
        Some(summary)
    }

    fn ensure_adding(&self) -> Result<(), VocabError> {
        if self.is_testing() {
            Err(VocabError::QuizInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::ParseError;
    use crate::test_support::{test_app, test_app_with};

    fn app_with_words(words: &[&str]) -> App {
        let mut app = test_app();
        for word in words {
            app.add_entry(word).unwrap();
        }
        app
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Vocab!");
        assert!(!app.is_testing());
        assert!(app.store.is_empty());
        assert_eq!(app.new_entry_tag, DEFAULT_TAG);
    }

    #[test]
    fn test_add_entry_rejects_missing_delimiter() {
        let mut app = test_app();
        let err = app.add_entry("apple").unwrap_err();
        assert!(matches!(err, VocabError::Parse(ParseError::MissingDelimiter)));
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_add_uses_new_entry_tag() {
        let mut app = test_app();
        app.set_new_entry_tag("Verbs").unwrap();
        app.add_entry("run: chạy").unwrap();
        app.set_new_entry_tag("  ").unwrap();
        app.add_entry("cat: con mèo").unwrap();
        assert_eq!(app.store.all()[0].tag, "Verbs");
        assert_eq!(app.store.all()[1].tag, DEFAULT_TAG);
    }

    #[test]
    fn test_start_test_on_empty_view() {
        let mut app = app_with_words(&["run: chạy"]);
        app.set_filter(TagFilter::Tag("Animals".into())).unwrap();
        assert!(matches!(app.start_test(), Err(VocabError::EmptyList)));
        assert!(!app.is_testing());
    }

    #[test]
    fn test_example_scenario() {
        let (mut app, audio, _) = test_app_with(None);
        app.add_entry("apple:quả táo").unwrap();
        app.add_entry("dog:con chó").unwrap();
        app.start_test().unwrap();
        assert_eq!(app.current_entry().unwrap().word, "apple");

        let first = app.submit_answer("quả táo").unwrap();
        assert!(first.correct);
        assert!(first.finished.is_none());
        assert_eq!(app.current_entry().unwrap().word, "dog");

        let second = app.submit_answer("mèo").unwrap();
        assert!(!second.correct);
        assert_eq!(second.expected, "con chó");
        let summary = second.finished.unwrap();
        assert_eq!((summary.score, summary.total), (1, 2));
        assert_eq!(summary.reason, EndReason::Completed);

        assert!(!app.is_testing());
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history.records()[0].score, 1);
        assert_eq!(
            audio.played(),
            vec![
                Sound::Word("apple".into()),
                Sound::Correct,
                Sound::Word("dog".into()),
                Sound::Incorrect,
            ]
        );
    }

    #[test]
    fn test_quiz_runs_over_filtered_view() {
        let mut app = test_app();
        app.add_entry_tagged("run: chạy", "Verbs").unwrap();
        app.add_entry_tagged("cat: con mèo", "Animals").unwrap();
        app.add_entry_tagged("eat: ăn", "Verbs").unwrap();
        app.set_filter(TagFilter::Tag("Verbs".into())).unwrap();

        app.start_test().unwrap();
        assert_eq!(app.session().unwrap().total(), 2);
        app.submit_answer("chạy").unwrap();
        assert_eq!(app.current_entry().unwrap().word, "eat");
        let summary = app.submit_answer("ăn").unwrap().finished.unwrap();
        assert_eq!(summary.score, 2);
    }

    #[test]
    fn test_mutations_blocked_while_testing() {
        let mut app = app_with_words(&["run: chạy"]);
        app.start_test().unwrap();
        assert!(matches!(app.add_entry("a: b"), Err(VocabError::QuizInProgress)));
        assert!(matches!(app.delete_entry(0), Err(VocabError::QuizInProgress)));
        assert!(matches!(app.import_text("a: b|X"), Err(VocabError::QuizInProgress)));
        assert!(matches!(app.cycle_filter(), Err(VocabError::QuizInProgress)));
        assert!(matches!(app.start_test(), Err(VocabError::QuizInProgress)));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_answer_when_not_testing() {
        let mut app = app_with_words(&["run: chạy"]);
        assert!(matches!(app.submit_answer("chạy"), Err(VocabError::NotTesting)));
        assert!(matches!(app.stop_test(), Err(VocabError::NotTesting)));
    }

    #[test]
    fn test_stop_test_records_history_and_cancels_timer() {
        let (mut app, _, scheduler) = test_app_with(Some(Duration::from_secs(30)));
        app.add_entry("a: 1").unwrap();
        app.add_entry("b: 2").unwrap();
        app.start_test().unwrap();
        let id = app.session().unwrap().id();
        app.submit_answer("1").unwrap();

        let summary = app.stop_test().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.reason, EndReason::Stopped);
        assert_eq!(app.history.records()[0].score, 1);
        assert_eq!(scheduler.cancelled(), vec![id]);
    }

    #[test]
    fn test_deadline_ends_session_once() {
        let (mut app, _, scheduler) = test_app_with(Some(Duration::from_secs(10)));
        app.add_entry("a: 1").unwrap();
        app.start_test().unwrap();
        let (id, limit) = scheduler.scheduled()[0];
        assert_eq!(limit, Duration::from_secs(10));

        let summary = app.deadline_elapsed(id).unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.reason, EndReason::TimedOut);
        assert!(!app.is_testing());
        assert_eq!(app.history.len(), 1);

        assert!(app.deadline_elapsed(id).is_none());
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_huge_time_limit_starts_test() {
        let (mut app, _, _) = test_app_with(Some(Duration::from_secs(9_000_000_000_000)));
        app.add_entry("a: 1").unwrap();
        app.start_test().unwrap();
        assert!(app.is_testing());
        let summary = app.submit_answer("1").unwrap().finished.unwrap();
        assert_eq!(summary.score, 1);
    }

    #[test]
    fn test_stale_deadline_ignored_by_new_session() {
        let (mut app, _, scheduler) = test_app_with(Some(Duration::from_secs(10)));
        app.add_entry("a: 1").unwrap();

        app.start_test().unwrap();
        let old = app.session().unwrap().id();
        app.stop_test().unwrap();
        app.start_test().unwrap();

        assert!(app.deadline_elapsed(old).is_none());
        assert!(app.is_testing());
        assert_eq!(scheduler.cancelled(), vec![old]);
    }

    #[test]
    fn test_all_wrong_scores_zero() {
        let mut app = app_with_words(&["a: 1", "b: 2", "c: 3"]);
        app.start_test().unwrap();
        let mut last = None;
        for _ in 0..3 {
            last = app.submit_answer("nope").unwrap().finished;
        }
        assert_eq!(last.unwrap().score, 0);
    }

    #[test]
    fn test_speech_off_still_plays_cues() {
        let (mut app, audio, _) = test_app_with(None);
        app.speak_words = false;
        app.add_entry("a: 1").unwrap();
        app.start_test().unwrap();
        app.submit_answer("1").unwrap();
        assert_eq!(audio.played(), vec![Sound::Correct]);
    }

    #[test]
    fn test_cycle_filter_walks_tags() {
        let mut app = test_app();
        app.add_entry_tagged("run: chạy", "Verbs").unwrap();
        app.add_entry_tagged("cat: con mèo", "Animals").unwrap();
        assert_eq!(app.cycle_filter().unwrap(), &TagFilter::Tag("Verbs".into()));
        assert_eq!(app.cycle_filter().unwrap(), &TagFilter::Tag("Animals".into()));
        assert_eq!(app.cycle_filter().unwrap(), &TagFilter::All);
    }

    #[test]
    fn test_export_import_preserves_every_accepted_entry() {
        let mut app = test_app();
        assert!(app.add_entry("either|or: hoặc").is_err());
        assert!(app.add_entry_tagged("dog: con\nchó", "Animals").is_err());
        assert!(app.add_entry_tagged("dog: con chó", "Ani\nmals").is_err());
        app.add_entry_tagged("ratio /ˈreɪ.ʃi.əʊ/: 3:4", "Math").unwrap();
        app.add_entry_tagged("and/or: và/hoặc", "Con|junctions").unwrap();
        app.add_entry("dog: con chó").unwrap();

        fn pairs(entries: &[VocabEntry]) -> Vec<(String, String)> {
            entries
                .iter()
                .map(|e| (e.text.clone(), e.tag.clone()))
                .collect()
        }
        let reimported = codec::import(&app.export_text());
        assert_eq!(pairs(&reimported), pairs(app.store.all()));
    }

    #[test]
    fn test_import_appends() {
        let mut app = app_with_words(&["a: 1"]);
        let count = app.import_text("a: 1|General\nb: 2|Verbs\n").unwrap();
        assert_eq!(count, 2);
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.export_text(), "a: 1|General\na: 1|General\nb: 2|Verbs");
    }
}
