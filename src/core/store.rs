//! # Entry Store
//!
//! The ordered vocabulary list. Insertion order is preserved and duplicates
//! are allowed. Every mutation writes the whole list back to the
//! `vocabList` key; a failed write is reported but not rolled back, so the
//! in-memory list stays ahead of disk until the next successful write.

use std::sync::Arc;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::entry::{DEFAULT_TAG, VocabEntry};
use crate::core::error::VocabError;
use crate::core::storage::{KeyValueStore, VOCAB_LIST_KEY, load_json, save_json, set_aside};

/// Wire shape of one list element. Early data stored bare strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StoredEntry {
    Tagged {
        entry: String,
        #[serde(default)]
        tag: String,
    },
    Bare(String),
}

impl StoredEntry {
    fn into_entry(self) -> Option<VocabEntry> {
        match self {
            StoredEntry::Tagged { entry, tag } => VocabEntry::from_text(&entry, &tag),
            StoredEntry::Bare(entry) => VocabEntry::from_text(&entry, DEFAULT_TAG),
        }
    }
}

impl From<&VocabEntry> for StoredEntry {
    fn from(entry: &VocabEntry) -> Self {
        StoredEntry::Tagged {
            entry: entry.text.clone(),
            tag: entry.tag.clone(),
        }
    }
}

pub struct EntryStore {
    entries: Vec<VocabEntry>,
    storage: Arc<dyn KeyValueStore>,
}

impl EntryStore {
    /// An empty store that persists into `storage`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            entries: Vec::new(),
            storage,
        }
    }

    /// Restores the list saved in `storage`, or starts empty if there is
    /// none or it cannot be read.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(storage);
        match load_json::<Vec<StoredEntry>>(store.storage.as_ref(), VOCAB_LIST_KEY) {
            Ok(Some(stored)) => {
                let count = stored.len();
                let entries: Vec<VocabEntry> =
                    stored.into_iter().filter_map(StoredEntry::into_entry).collect();
                if entries.len() < count {
                    warn!("Dropped {} stored entries with no word", count - entries.len());
                }
                info!("Restored {} vocabulary entries", entries.len());
                store.restore(entries);
            }
            Ok(None) => info!("No saved vocabulary, starting empty"),
            Err(e) => {
                warn!("Failed to load vocabulary, starting empty: {}", e);
                match set_aside(store.storage.as_ref(), VOCAB_LIST_KEY) {
                    Ok(backup) => warn!("Unreadable vocabulary kept under {}", backup),
                    Err(e) => error!("Could not back up unreadable vocabulary: {}", e),
                }
            }
        }
        store
    }

    pub fn add(&mut self, entry: VocabEntry) -> Result<(), VocabError> {
        self.entries.push(entry);
        self.persist()
    }

    /// Appends several entries with a single write. Returns how many were added.
    pub fn extend(&mut self, entries: Vec<VocabEntry>) -> Result<usize, VocabError> {
        let count = entries.len();
        self.entries.extend(entries);
        self.persist()?;
        Ok(count)
    }

    /// Removes and returns the entry at `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<VocabEntry, VocabError> {
        if index >= self.entries.len() {
            return Err(VocabError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(removed)
    }

    pub fn all(&self) -> &[VocabEntry] {
        &self.entries
    }

    /// Replaces the whole list without writing it.
    pub fn restore(&mut self, entries: Vec<VocabEntry>) {
        self.entries = entries;
    }

    pub fn snapshot(&self) -> Vec<VocabEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !tags.contains(&entry.tag) {
                tags.push(entry.tag.clone());
            }
        }
        tags
    }

    fn persist(&self) -> Result<(), VocabError> {
        let stored: Vec<StoredEntry> = self.entries.iter().map(StoredEntry::from).collect();
        save_json(self.storage.as_ref(), VOCAB_LIST_KEY, &stored)?;
        Ok(())
    }
}
