use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{HistoryChart, QuizView, TitleBar, WordList};
use crate::tui::theme::Theme;
use crate::tui::{Prompt, TuiState};

const CHART_HEIGHT: u16 = 9;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let theme = Theme::for_mode(app.prefs.dark_mode());
    frame.render_widget(Block::default().style(theme.base), frame.area());

    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    let view = app.view();

    let mode = match app.session() {
        Some(session) => format!("Testing {}/{}", session.position() + 1, session.total()),
        None => app.mode.label().to_string(),
    };
    let mut title_bar = TitleBar {
        mode,
        filter_label: app.filter.label().to_string(),
        view_len: view.len(),
        remaining: app.session().and_then(|s| s.remaining(Local::now())),
        status_message: app.status_message.clone(),
        style: theme.accent,
    };
    title_bar.render(frame, title_area);

    match (app.session(), app.current_entry()) {
        (Some(session), Some(entry)) => {
            let mut quiz = QuizView {
                prompt: entry.prompt(),
                tag: entry.tag.clone(),
                position: session.position(),
                total: session.total(),
                score: session.score(),
                confirm_stop: tui.confirm_stop,
                theme,
            };
            quiz.render(frame, main_area);
        }
        _ => {
            let [list_area, chart_area] =
                Layout::vertical([Min(0), Length(CHART_HEIGHT)]).areas(main_area);
            WordList::new(&mut tui.word_list, &view, app.filter.label(), theme)
                .render(frame, list_area);
            let mut chart = HistoryChart {
                records: app.history.recent(HistoryChart::capacity(chart_area.width)),
                last_summary: app.last_summary,
                theme,
            };
            chart.render(frame, chart_area);
        }
    }

    tui.input_box.title = input_title(app, tui.prompt);
    tui.input_box.style = theme.base;
    tui.input_box.render(frame, input_area);
}

fn input_title(app: &App, prompt: Prompt) -> String {
    if app.is_testing() {
        return " Your answer ".to_string();
    }
    match prompt {
        Prompt::Entry => format!(
            " word /phonetic/: meaning  (tag: {})  Ctrl+C Quit ",
            app.new_entry_tag
        ),
        Prompt::Tag => " Tag for new words (Enter to set, Esc to cancel) ".to_string(),
        Prompt::ImportPath => " File to import (Enter to import, Esc to cancel) ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_adding_screen() {
        let mut app = test_app();
        app.add_entry("dog: con chó").unwrap();
        let mut tui = TuiState::new(PathBuf::from("."));

        let text = render(&app, &mut tui);
        assert!(text.contains("Vocab | Adding | All (1)"));
        assert!(text.contains("Words: All"));
        assert!(text.contains("No tests taken yet."));
        assert!(text.contains("tag: General"));
    }

    #[test]
    fn test_draw_testing_screen() {
        let mut app = test_app();
        app.add_entry("apple /ˈæp.əl/: quả táo").unwrap();
        app.start_test().unwrap();
        let mut tui = TuiState::new(PathBuf::from("."));

        let text = render(&app, &mut tui);
        assert!(text.contains("Testing 1/1"));
        assert!(text.contains("Question 1/1"));
        assert!(text.contains("apple"));
        assert!(text.contains("Your answer"));
    }

    #[test]
    fn test_input_titles_follow_prompt() {
        let app = test_app();
        assert!(input_title(&app, Prompt::Tag).contains("Tag for new words"));
        assert!(input_title(&app, Prompt::ImportPath).contains("File to import"));
    }
}
