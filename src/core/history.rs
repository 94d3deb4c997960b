//! # Score History
//!
//! One record per finished test, appended and never edited. The whole log is
//! written to the `scoreHistory` key after each append.

use std::sync::Arc;

use chrono::Local;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::error::VocabError;
use crate::core::storage::{KeyValueStore, SCORE_HISTORY_KEY, load_json, save_json, set_aside};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub date: String,
    pub score: u32,
    /// Number of questions in the session. Older records don't have it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

impl HistoryRecord {
    /// A record dated today in local time.
    pub fn today(score: u32, total: u32) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d").to_string(),
            score,
            total: Some(total),
        }
    }
}

pub struct HistoryLog {
    records: Vec<HistoryRecord>,
    storage: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let records = match load_json::<Vec<HistoryRecord>>(storage.as_ref(), SCORE_HISTORY_KEY) {
            Ok(Some(records)) => {
                info!("Restored {} history records", records.len());
                records
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load score history, starting empty: {}", e);
                if let Err(e) = set_aside(storage.as_ref(), SCORE_HISTORY_KEY) {
                    error!("Could not back up unreadable score history: {}", e);
                }
                Vec::new()
            }
        };
        Self { records, storage }
    }

    /// Appends `record`. The record is kept even when the write fails.
    pub fn append(&mut self, record: HistoryRecord) -> Result<(), VocabError> {
        self.records.push(record);
        save_json(self.storage.as_ref(), SCORE_HISTORY_KEY, &self.records)?;
        Ok(())
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
