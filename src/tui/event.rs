use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Submit,
    Escape,
    Resize,

    // Editing (routed to the InputBox)
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    WordLeft,
    WordRight,
    CursorHome,
    CursorEnd,

    // List navigation
    CursorUp,
    CursorDown,

    // Commands
    CycleFilter,    // Tab
    EditTag,        // Ctrl+G
    OpenImport,     // Ctrl+O
    DeleteSelected, // Ctrl+D
    StartTest,      // Ctrl+S
    Speak,          // Ctrl+P
    ToggleTheme,    // Ctrl+T
    Export,         // Ctrl+E
}

/// Translate a key press into a TUI event. Release and repeat events (sent
/// by terminals with keyboard enhancement) are dropped.
pub fn map_key(key: KeyEvent) -> Option<TuiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::ForceQuit),
        KeyCode::Char('g') if ctrl => Some(TuiEvent::EditTag),
        KeyCode::Char('o') if ctrl => Some(TuiEvent::OpenImport),
        KeyCode::Char('d') if ctrl => Some(TuiEvent::DeleteSelected),
        KeyCode::Char('s') if ctrl => Some(TuiEvent::StartTest),
        KeyCode::Char('p') if ctrl => Some(TuiEvent::Speak),
        KeyCode::Char('t') if ctrl => Some(TuiEvent::ToggleTheme),
        KeyCode::Char('e') if ctrl => Some(TuiEvent::Export),
        KeyCode::Char('a') if ctrl => Some(TuiEvent::CursorHome),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Tab => Some(TuiEvent::CycleFilter),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left if alt || ctrl => Some(TuiEvent::WordLeft),
        KeyCode::Right if alt || ctrl => Some(TuiEvent::WordRight),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        _ => None,
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            map_key(key_event)
        }
        // Single-line input: newlines in a paste become spaces
        Event::Paste(data) => Some(TuiEvent::Paste(data.replace(['\r', '\n'], " "))),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(event) => map_event(event),
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}
