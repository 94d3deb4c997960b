//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Testing**: draws every ~250ms so the countdown ticks.
//! - **Adding**: sleeps up to 500ms, only redraws on events, resizes or
//!   background actions.
//!
//! ## Background actions
//!
//! The deadline timer runs on the tokio runtime and sends
//! `Action::DeadlineElapsed` through an mpsc channel that the loop drains
//! once per tick.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::audio::{AudioSink, CommandAudio, NoopAudio};
use crate::core::config::ResolvedConfig;
use crate::core::filter::filtered_indices;
use crate::core::state::App;
use crate::core::storage::FileStore;
use crate::core::timer::TokioScheduler;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, WordListEvent, WordListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const TESTING_TICK: Duration = Duration::from_millis(250);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// What Enter does while adding words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Parse the input as a new entry.
    Entry,
    /// Set the tag given to new entries.
    Tag,
    /// Read the input as a path and import that file.
    ImportPath,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub word_list: WordListState,
    pub prompt: Prompt,
    /// Esc was pressed once during a test
    pub confirm_stop: bool,
    /// Where Ctrl+E writes `vocab_list.txt`
    pub export_dir: PathBuf,
}

impl TuiState {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            input_box: InputBox::new(),
            word_list: WordListState::new(),
            prompt: Prompt::Entry,
            confirm_stop: false,
            export_dir,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that lack it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

/// Build the audio sink from the resolved speech and cue commands.
pub fn build_audio(config: &ResolvedConfig) -> Arc<dyn AudioSink> {
    let speech = config
        .speech_command
        .clone()
        .filter(|_| config.speak_words);
    if speech.is_none() && config.correct_sound.is_none() && config.incorrect_sound.is_none() {
        info!("Audio disabled");
        return Arc::new(NoopAudio);
    }
    Arc::new(CommandAudio::new(
        speech,
        config.correct_sound.clone(),
        config.incorrect_sound.clone(),
    ))
}

/// Runs the TUI until the user quits. Must be called from inside a tokio
/// runtime; the deadline timer is spawned on it.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let storage = FileStore::open(&config.data_dir).map_err(std::io::Error::other)?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let scheduler = Arc::new(TokioScheduler::new(tokio::runtime::Handle::current(), tx));
    let mut app = App::from_config(&config, Arc::new(storage), build_audio(&config), scheduler);

    let export_dir = dirs::download_dir().unwrap_or_else(|| config.data_dir.clone());
    let mut tui = TuiState::new(export_dir);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        // The countdown needs a fresh frame every tick
        if needs_redraw || app.is_testing() {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_testing() { TESTING_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (deadline expiry)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            apply_effect(&mut tui, &effect);
        }
    }

    if let Some(session) = app.session() {
        info!("Quitting mid-test (session {}); no score recorded", session.id());
    }
    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns `Effect::Quit` when the app should exit.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        // ForceQuit (Ctrl+C) always quits regardless of mode
        TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::ToggleTheme => update(app, Action::ToggleTheme),
        _ if app.is_testing() => handle_testing(app, tui, event),
        _ => handle_adding(app, tui, event),
    }
}

fn handle_testing(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event == TuiEvent::Escape {
        if tui.confirm_stop {
            tui.confirm_stop = false;
            let effect = update(app, Action::StopTest);
            apply_effect(tui, &effect);
            return effect;
        }
        tui.confirm_stop = true;
        return Effect::None;
    }
    tui.confirm_stop = false;

    if event == TuiEvent::Speak {
        return update(app, Action::Speak(None));
    }

    // A blank answer is a wrong answer, not a no-op
    tui.input_box.allow_empty = true;
    match tui.input_box.handle_event(&event) {
        Some(InputEvent::Submit(text)) => submit(app, tui, text, Action::SubmitAnswer),
        _ => Effect::None,
    }
}

fn handle_adding(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    tui.input_box.allow_empty = false;

    if tui.prompt != Prompt::Entry {
        return handle_prompt(app, tui, event);
    }

    // The list sees every event so any key cancels a pending delete
    tui.word_list.set_len(app.view().len());
    if let Some(list_event) = tui.word_list.handle_event(&event) {
        let indices = filtered_indices(app.store.all(), &app.filter);
        return match list_event {
            WordListEvent::Delete(position) => match indices.get(position) {
                Some(&index) => update(app, Action::DeleteEntry(index)),
                None => Effect::None,
            },
            WordListEvent::Speak(position) => {
                update(app, Action::Speak(indices.get(position).copied()))
            }
        };
    }

    match event {
        TuiEvent::CycleFilter => update(app, Action::CycleFilter),
        TuiEvent::StartTest => {
            let effect = update(app, Action::StartTest);
            apply_effect(tui, &effect);
            effect
        }
        TuiEvent::Export => update(app, Action::Export(tui.export_dir.clone())),
        TuiEvent::EditTag => {
            tui.prompt = Prompt::Tag;
            tui.input_box.set_text(&app.new_entry_tag);
            Effect::None
        }
        TuiEvent::OpenImport => {
            tui.prompt = Prompt::ImportPath;
            tui.input_box.clear();
            Effect::None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => submit(app, tui, text, Action::AddEntry),
            _ => Effect::None,
        },
    }
}

/// The tag and import-path prompts. Esc goes back to adding entries.
fn handle_prompt(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event == TuiEvent::Escape {
        tui.prompt = Prompt::Entry;
        tui.input_box.clear();
        return Effect::None;
    }
    let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) else {
        return Effect::None;
    };

    let effect = match tui.prompt {
        Prompt::Tag => update(app, Action::SetNewEntryTag(text)),
        Prompt::ImportPath => match read_import_file(Path::new(text.trim())) {
            Ok(contents) => update(app, Action::Import(contents)),
            Err(e) => {
                warn!("Failed to read import file {:?}: {}", text.trim(), e);
                app.status_message = format!("Cannot read {}: {}", text.trim(), e);
                tui.input_box.set_text(&text);
                return Effect::None;
            }
        },
        Prompt::Entry => Effect::None,
    };
    tui.prompt = Prompt::Entry;
    tui.input_box.clear();
    effect
}

fn read_import_file(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}

/// Sends submitted text to the core. When the core rejects it the text goes
/// back into the input box so the user can fix it.
fn submit(
    app: &mut App,
    tui: &mut TuiState,
    text: String,
    action: impl FnOnce(String) -> Action,
) -> Effect {
    let effect = update(app, action(text.clone()));
    if effect == Effect::None {
        tui.input_box.set_text(&text);
    }
    apply_effect(tui, &effect);
    effect
}

fn apply_effect(tui: &mut TuiState, effect: &Effect) {
    if *effect == Effect::ClearInput {
        tui.input_box.clear();
        tui.confirm_stop = false;
    }
}
