//! # Command Line
//!
//! `vocab` with no subcommand opens the TUI. Subcommands run one operation
//! against the same data directory and exit:
//!
//! ```text
//! vocab add "dog: con chó" --tag Animals
//! vocab list --tag Animals
//! vocab delete 2 --yes
//! vocab import words.txt
//! vocab export --dir ~/Downloads
//! vocab history
//! ```
//!
//! Positions shown by `list` and taken by `delete` start at 1.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use thiserror::Error;

use crate::core::config::CliOverrides;
use crate::core::error::VocabError;
use crate::core::filter::{TagFilter, filtered_indices};
use crate::core::state::App;

#[derive(Parser, Debug)]
#[command(name = "vocab", version, about = "Vocabulary memorization in the terminal")]
pub struct Args {
    /// Quiz time limit in seconds (0 = untimed)
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,

    /// Tag to filter the quiz to on startup
    #[arg(long)]
    pub tag: Option<String>,

    /// Where the word list, history and log are kept
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Turn off pronunciation and answer sounds
    #[arg(long)]
    pub mute: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            time_limit_secs: self.time_limit,
            tag: self.tag.clone(),
            data_dir: self.data_dir.clone(),
            mute: self.mute,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add one entry, e.g. "apple /ˈæp.əl/: quả táo"
    Add {
        raw: String,
        /// Tag for the entry (defaults to the configured tag)
        #[arg(long)]
        tag: Option<String>,
    },
    /// List entries with their positions
    List {
        /// Only show this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Delete the entry at a position shown by `list`
    Delete {
        position: usize,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Append entries from an `entry|tag` file
    Import { file: PathBuf },
    /// Write all entries to vocab_list.txt
    Export {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show past quiz scores
    History,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs one batch command against `app`, writing results to `out`.
/// `input` answers the delete confirmation.
pub fn execute(
    command: Command,
    app: &mut App,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<(), CliError> {
    info!("Running command {:?}", command);
    match command {
        Command::Add { raw, tag } => {
            let tag = tag.unwrap_or_else(|| app.new_entry_tag.clone());
            app.add_entry_tagged(&raw, &tag)?;
            if let Some(entry) = app.store.all().last() {
                writeln!(out, "Added: {} [{}]", entry.text, entry.tag)?;
            }
        }
        Command::List { tag } => {
            let filter = match tag {
                Some(tag) => TagFilter::from_label(Some(tag.as_str())),
                None => TagFilter::All,
            };
            let entries = app.store.all();
            let indices = filtered_indices(entries, &filter);
            if indices.is_empty() {
                writeln!(out, "No words.")?;
            }
            for index in indices {
                let entry = &entries[index];
                writeln!(out, "{:>4}  {}  [{}]", index + 1, entry.text, entry.tag)?;
            }
        }
        Command::Delete { position, yes } => {
            let len = app.store.len();
            let index = position
                .checked_sub(1)
                .filter(|&i| i < len)
                .ok_or(VocabError::IndexOutOfRange {
                    index: position,
                    len,
                })?;
            let text = app.store.all()[index].text.clone();
            if !yes && !confirm(out, input, &format!("Delete \"{}\"?", text))? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            let removed = app.delete_entry(index)?;
            writeln!(out, "Deleted: {}", removed.text)?;
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file).map_err(|source| CliError::File {
                path: file.clone(),
                source,
            })?;
            let count = app.import_text(&text)?;
            writeln!(out, "Imported {} words", count)?;
        }
        Command::Export { dir } => {
            let path = app.export_to_dir(&dir).map_err(|source| CliError::File {
                path: dir.clone(),
                source,
            })?;
            writeln!(out, "Exported {} words to {}", app.store.len(), path.display())?;
        }
        Command::History => {
            let records = app.history.records();
            if records.is_empty() {
                writeln!(out, "No tests taken yet.")?;
            }
            for record in records {
                match record.total {
                    Some(total) => writeln!(out, "{}  {}/{}", record.date, record.score, total)?,
                    None => writeln!(out, "{}  {}", record.date, record.score)?,
                }
            }
        }
    }
    Ok(())
}

/// Asks a yes/no question. Anything but `y`/`yes` is a no.
fn confirm(out: &mut impl Write, input: &mut impl BufRead, question: &str) -> io::Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
