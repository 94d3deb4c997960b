//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: mode, filter, countdown and status line
//! - `QuizView`: the current question card
//! - `HistoryChart`: recent scores as bars
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: single-line text input shared by every prompt
//! - `WordList`: the filtered list with selection and two-press delete
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests.

mod title_bar;
pub use title_bar::TitleBar;

pub mod history_chart;
pub mod input_box;
pub mod quiz_view;
pub mod word_list;

pub use history_chart::HistoryChart;
pub use input_box::{InputBox, InputEvent};
pub use quiz_view::QuizView;
pub use word_list::{WordList, WordListEvent, WordListState};
