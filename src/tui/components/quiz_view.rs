//! # Quiz View Component
//!
//! The question card shown while testing: the word (with phonetics), the
//! question counter and the running score. Stateless; the parent builds it
//! from the current session each frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct QuizView {
    /// Word as shown to the user, e.g. `apple /ˈæp.əl/`
    pub prompt: String,
    pub tag: String,
    /// Zero-based question index
    pub position: usize,
    pub total: usize,
    pub score: u32,
    /// Esc was pressed once; the next Esc stops the test
    pub confirm_stop: bool,
    pub theme: Theme,
}

impl Component for QuizView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.confirm_stop {
            " Press Esc again to stop the test | any key continues "
        } else {
            " Enter Answer  Ctrl+P Replay  Esc Stop "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.confirm_stop {
                self.theme.warning
            } else {
                self.theme.muted
            })
            .title(format!(
                " Question {}/{} | Score {} ",
                self.position + 1,
                self.total,
                self.score
            ))
            .title_bottom(Line::from(help_text).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, prompt_area, tag_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let prompt = Paragraph::new(Line::from(Span::styled(
            self.prompt.as_str(),
            self.theme.accent.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(prompt, prompt_area);

        let tag = Paragraph::new(format!("[{}]  What does it mean?", self.tag))
            .style(self.theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(tag, tag_area);
    }
}
