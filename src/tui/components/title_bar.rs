//! # TitleBar Component
//!
//! Top status bar: mode, active filter, countdown and the latest status
//! message. Purely presentational; every field is a prop.
//!
//! ```text
//! Vocab | Testing 2/5 | Animals (5) | ⏱ 2:41 | Correct!
//! Vocab | Adding | All (12) | Added (12 words)
//! ```

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar {
    /// "Adding", or "Testing 2/5"
    pub mode: String,
    pub filter_label: String,
    /// Entries in the filtered view
    pub view_len: usize,
    /// Time left in a timed test
    pub remaining: Option<Duration>,
    pub status_message: String,
    pub style: Style,
}

impl TitleBar {
    fn text(&self) -> String {
        let mut parts = vec![
            "Vocab".to_string(),
            self.mode.clone(),
            format!("{} ({})", self.filter_label, self.view_len),
        ];
        if let Some(remaining) = self.remaining {
            parts.push(format!("⏱ {}", format_remaining(remaining)));
        }
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::styled(self.text(), self.style), area);
    }
}

/// `m:ss`, rounding partial seconds up so the display never shows 0:00
/// while time is left.
pub fn format_remaining(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}
