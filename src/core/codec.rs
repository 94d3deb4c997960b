//! # Import / Export
//!
//! Flat text transfer format, one entry per line:
//!
//! ```text
//! apple /ˈæp.əl/: quả táo|Fruit
//! dog: con chó|General
//! ```
//!
//! The entry text is carried as-is; it is not re-validated on import.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::core::entry::{DEFAULT_TAG, VocabEntry};
use crate::core::storage::atomic_write;

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "vocab_list.txt";

/// Serializes entries as `entry|tag` lines joined by `\n`.
pub fn export(entries: &[VocabEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}|{}", entry.text, entry.tag))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes [`export`] output to `dir/vocab_list.txt` and returns the path.
pub fn export_to_dir(entries: &[VocabEntry], dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    atomic_write(&path, &export(entries))?;
    info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(path)
}

/// Parses `entry|tag` lines. Blank lines are dropped, a missing tag becomes
/// `General`, and lines without a word are skipped.
pub fn import(text: &str) -> Vec<VocabEntry> {
    let mut entries = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (entry_text, tag) = line.split_once('|').unwrap_or((line, DEFAULT_TAG));
        match VocabEntry::from_text(entry_text, tag) {
            Some(entry) => entries.push(entry),
            None => warn!("Skipping import line {}: no word", line_no + 1),
        }
    }
    entries
}
