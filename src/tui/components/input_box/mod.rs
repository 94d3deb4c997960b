//! # InputBox Component
//!
//! Single-line text input shared by every prompt: new entries, answers,
//! the new-entry tag and the import path.
//!
//! The buffer and cursor are internal state. The title, style and whether
//! an empty submit is allowed are props set by the parent each frame.

mod cursor;
mod editing;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use editing::{next_char_boundary, next_word_boundary, prev_char_boundary, prev_word_boundary};

/// Height of the input box: one line plus borders.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Text and border style (Prop)
    pub style: Style,
    /// Whether Enter on a blank buffer still submits (Prop)
    pub allow_empty: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: String::new(),
            style: Style::default(),
            allow_empty: false,
            cursor: CursorState::new(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Replace the buffer, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor.pos = self.buffer.len();
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll(&self.buffer, area.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.style)
            .title(self.title.as_str());
        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(self.style)
            .scroll((0, self.cursor.scroll));
        frame.render_widget(input, area);

        frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let pos = self.cursor.pos;
        let new_pos = match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                return Some(InputEvent::ContentChanged);
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(pos, text);
                self.cursor.pos += text.len();
                return Some(InputEvent::ContentChanged);
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, pos);
                self.buffer.drain(prev..pos);
                prev
            }
            TuiEvent::Delete if pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, pos);
                self.buffer.drain(pos..next);
                return Some(InputEvent::ContentChanged);
            }
            TuiEvent::CursorLeft if pos > 0 => prev_char_boundary(&self.buffer, pos),
            TuiEvent::CursorRight if pos < self.buffer.len() => {
                next_char_boundary(&self.buffer, pos)
            }
            TuiEvent::WordLeft => prev_word_boundary(&self.buffer, pos),
            TuiEvent::WordRight => next_word_boundary(&self.buffer, pos),
            TuiEvent::CursorHome => 0,
            TuiEvent::CursorEnd => self.buffer.len(),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() && !self.allow_empty {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                return Some(InputEvent::Submit(text));
            }
            _ => return None,
        };
        (new_pos != pos).then(|| {
            self.cursor.pos = new_pos;
            InputEvent::ContentChanged
        })
    }
}
