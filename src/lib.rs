//! Vocab library: the core domain, the batch CLI and the TUI adapter.

pub mod cli;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
