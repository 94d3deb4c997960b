//! Dark and light palettes. The choice is persisted by `Preferences`.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub base: Style,
    pub muted: Style,
    pub accent: Style,
    pub selected: Style,
    pub warning: Style,
    pub correct: Color,
    pub incorrect: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White).bg(Color::Black),
            muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Cyan),
            selected: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            warning: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            correct: Color::Green,
            incorrect: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black).bg(Color::White),
            muted: Style::default().fg(Color::Gray),
            accent: Style::default().fg(Color::Blue),
            selected: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            warning: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            correct: Color::Green,
            incorrect: Color::Red,
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}
