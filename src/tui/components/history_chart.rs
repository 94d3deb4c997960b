//! # History Chart Component
//!
//! Bar chart of the most recent quiz scores, one bar per test.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use crate::core::history::HistoryRecord;
use crate::core::quiz::SessionSummary;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

pub struct HistoryChart<'a> {
    pub records: &'a [HistoryRecord],
    pub last_summary: Option<SessionSummary>,
    pub theme: Theme,
}

impl HistoryChart<'_> {
    /// How many bars fit in `width` columns (inside the borders).
    pub fn capacity(width: u16) -> usize {
        (width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)) as usize
    }

    fn title(&self) -> String {
        match self.last_summary {
            Some(summary) => format!(" Scores (last: {}/{}) ", summary.score, summary.total),
            None => " Scores ".to_string(),
        }
    }
}

impl Component for HistoryChart<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.muted)
            .title(self.title());

        if self.records.is_empty() {
            let empty = Paragraph::new("No tests taken yet.")
                .style(self.theme.muted)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let shown = Self::capacity(area.width).min(self.records.len());
        let recent = &self.records[self.records.len() - shown..];
        let bars: Vec<Bar> = recent
            .iter()
            .map(|record| {
                Bar::default()
                    .value(u64::from(record.score))
                    .label(Line::from(short_date(&record.date)))
                    .text_value(match record.total {
                        Some(total) => format!("{}/{}", record.score, total),
                        None => record.score.to_string(),
                    })
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .bar_style(Style::default().fg(self.theme.correct))
            .value_style(self.theme.selected)
            .label_style(self.theme.muted);
        frame.render_widget(chart, area);
    }
}

/// `2024-03-07` → `03-07`; anything else is shown as is.
fn short_date(date: &str) -> String {
    match date.split_once('-') {
        Some((_, rest)) if rest.len() == 5 => rest.to_string(),
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quiz::EndReason;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn record(date: &str, score: u32) -> HistoryRecord {
        HistoryRecord {
            date: date.to_string(),
            score,
            total: Some(5),
        }
    }

    fn render_text(chart: &mut HistoryChart) -> String {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| chart.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-07"), "03-07");
        assert_eq!(short_date("3/7/2024"), "3/7/2024");
    }

    #[test]
    fn test_capacity() {
        assert_eq!(HistoryChart::capacity(40), 6);
        assert_eq!(HistoryChart::capacity(2), 0);
    }

    #[test]
    fn test_renders_recent_scores() {
        let records = vec![record("2024-03-07", 3), record("2024-03-08", 5)];
        let mut chart = HistoryChart {
            records: &records,
            last_summary: Some(SessionSummary {
                score: 5,
                total: 5,
                reason: EndReason::Completed,
            }),
            theme: Theme::dark(),
        };
        let text = render_text(&mut chart);
        assert!(text.contains("Scores (last: 5/5)"));
        assert!(text.contains("03-08"));
    }

    #[test]
    fn test_renders_empty_history() {
        let mut chart = HistoryChart {
            records: &[],
            last_summary: None,
            theme: Theme::light(),
        };
        assert!(render_text(&mut chart).contains("No tests taken yet."));
    }
}
