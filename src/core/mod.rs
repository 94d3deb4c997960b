//! # Core Application Logic
//!
//! Vocab's business logic. It knows nothing about any specific UI technology;
//! the TUI and the batch CLI are both adapters over it.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • entry / store        │
//!                    │  • filter / quiz        │
//!                    │  • history / codec      │
//!                    │  • state + update()     │
//!                    └───────────┬─────────────┘
//!                                │ ports
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ KeyValue   │      │  Audio     │      │  Deadline  │
//!     │ Store      │      │  Sink      │      │  Scheduler │
//!     │ (files)    │      │ (commands) │      │  (tokio)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entry`]: parsing `word /phonetic/: meaning` input
//! - [`store`]: the persisted vocabulary list
//! - [`filter`]: tag filtering and the derived view
//! - [`quiz`]: the Adding/Testing state machine
//! - [`history`]: past quiz scores
//! - [`codec`]: `entry|tag` import/export
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer

pub mod action;
pub mod audio;
pub mod codec;
pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod history;
pub mod prefs;
pub mod quiz;
pub mod state;
pub mod storage;
pub mod store;
pub mod timer;
