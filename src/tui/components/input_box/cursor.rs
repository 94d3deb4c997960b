//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll.
//! The text itself is owned by `InputBox` and passed in explicitly.

use super::editing::{BORDER_OFFSET, display_width, inner_width};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Columns scrolled off the left edge when the text is wider than the box
    pub scroll: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    /// Scroll just enough to keep the cursor inside the box.
    pub fn update_scroll(&mut self, buffer: &str, area_width: u16) {
        let width = inner_width(area_width) as usize;
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = display_width(buffer, self.pos);
        let scroll = self.scroll as usize;
        if col < scroll {
            self.scroll = col as u16;
        } else if col >= scroll + width {
            self.scroll = (col + 1 - width) as u16;
        }
    }

    /// Screen (column, row) of the cursor.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let col = display_width(buffer, self.pos) as u16;
        let visible = col.saturating_sub(self.scroll);
        let max_col = inner_width(area.width).saturating_sub(1);
        (
            area.x + BORDER_OFFSET + visible.min(max_col),
            area.y + BORDER_OFFSET,
        )
    }
}
