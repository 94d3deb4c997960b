//! # Word List Component
//!
//! The filtered vocabulary list shown while adding words. Up/Down select,
//! Ctrl+P speaks the selection, Ctrl+D twice deletes it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `WordListState` lives in `TuiState`
//! - `WordList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::entry::VocabEntry;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Persistent selection state for the word list.
#[derive(Default)]
pub struct WordListState {
    /// Position within the filtered view
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
    len: usize,
}

impl WordListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside a view of `len` entries.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the word list. Positions index the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListEvent {
    Delete(usize),
    Speak(usize),
}

impl EventHandler for WordListState {
    type Event = WordListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<WordListEvent> {
        // Any other key cancels a pending delete
        if !matches!(event, TuiEvent::DeleteSelected) {
            self.confirm_delete = false;
        }
        if self.len == 0 {
            return None;
        }

        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.len - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Speak => Some(WordListEvent::Speak(self.selected)),
            TuiEvent::DeleteSelected => {
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(WordListEvent::Delete(self.selected))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the word list.
pub struct WordList<'a> {
    state: &'a mut WordListState,
    entries: &'a [&'a VocabEntry],
    filter_label: &'a str,
    theme: Theme,
}

impl<'a> WordList<'a> {
    pub fn new(
        state: &'a mut WordListState,
        entries: &'a [&'a VocabEntry],
        filter_label: &'a str,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            entries,
            filter_label,
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.set_len(self.entries.len());

        let help_text = if self.state.confirm_delete {
            " Press Ctrl+D again to delete | any key cancels "
        } else {
            " Tab Filter  Ctrl+G Tag  Ctrl+O Import  Ctrl+S Test  Ctrl+D Delete "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.muted)
            .title(format!(" Words: {} ", self.filter_label))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let empty = Paragraph::new("No words yet. Type word: meaning and press Enter.")
                .style(self.theme.muted)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Layout: "<text>   [tag]" within borders + padding
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let tag = format!("[{}]", entry.tag);
                let text_width = inner_width.saturating_sub(tag.chars().count() + 2);
                let text = pad_to(&truncate_str(&entry.text, text_width), text_width);

                let style = if i == self.state.selected {
                    if self.state.confirm_delete {
                        self.theme.warning
                    } else {
                        self.theme.selected
                    }
                } else {
                    self.theme.base
                };

                ListItem::new(Line::from(vec![
                    Span::styled(text, style),
                    Span::styled("  ", style),
                    Span::styled(tag, style.patch(self.theme.accent)),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` terminal columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

fn pad_to(s: &str, width: usize) -> String {
    let used: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::parse;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with(len: usize) -> WordListState {
        let mut state = WordListState::new();
        state.set_len(len);
        state
    }

    #[test]
    fn test_selection_clamps() {
        let mut state = state_with(2);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);

        state.set_len(1);
        assert_eq!(state.selected, 0);
        state.set_len(0);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_delete_needs_two_presses() {
        let mut state = state_with(3);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::DeleteSelected), None);
        assert!(state.confirm_delete);
        assert_eq!(
            state.handle_event(&TuiEvent::DeleteSelected),
            Some(WordListEvent::Delete(1))
        );
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_other_key_cancels_delete() {
        let mut state = state_with(3);
        state.handle_event(&TuiEvent::DeleteSelected);
        state.handle_event(&TuiEvent::InputChar('x'));
        assert!(!state.confirm_delete);
        assert_eq!(state.handle_event(&TuiEvent::DeleteSelected), None);
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let mut state = state_with(0);
        assert_eq!(state.handle_event(&TuiEvent::Speak), None);
        assert_eq!(state.handle_event(&TuiEvent::DeleteSelected), None);
        assert_eq!(state.handle_event(&TuiEvent::DeleteSelected), None);
    }

    #[test]
    fn test_speak_selected() {
        let mut state = state_with(2);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Speak), Some(WordListEvent::Speak(1)));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("dog", 10), "dog");
        assert_eq!(truncate_str("con chó đẹp", 8), "con c...");
        assert_eq!(truncate_str("abcdef", 2), "..");
    }

    #[test]
    fn test_render_lists_entries_with_tags() {
        let apple = parse("apple /ˈæp.əl/: quả táo", "Fruit").unwrap();
        let dog = parse("dog: con chó", "Animals").unwrap();
        let entries = vec![&apple, &dog];
        let mut state = WordListState::new();

        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                WordList::new(&mut state, &entries, "All", Theme::dark()).render(f, f.area())
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Words: All"));
        assert!(text.contains("dog: con ch"));
        assert!(text.contains("[Animals]"));
        assert!(text.contains("[Fruit]"));
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_render_empty_list() {
        let mut state = WordListState::new();
        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| WordList::new(&mut state, &[], "All", Theme::light()).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No words yet"));
    }
}
