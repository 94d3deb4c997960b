//! Display preferences, stored under the `darkMode` key independently of
//! the vocabulary data.

use std::sync::Arc;

use log::warn;

use crate::core::error::VocabError;
use crate::core::storage::{DARK_MODE_KEY, KeyValueStore, load_json, save_json};

pub struct Preferences {
    dark_mode: bool,
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let dark_mode = match load_json::<bool>(storage.as_ref(), DARK_MODE_KEY) {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                warn!("Failed to load display preference: {}", e);
                false
            }
        };
        Self { dark_mode, storage }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flips the theme and returns the new value. The flip sticks in memory
    /// even if it can't be saved.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, VocabError> {
        self.dark_mode = !self.dark_mode;
        save_json(self.storage.as_ref(), DARK_MODE_KEY, &self.dark_mode)?;
        Ok(self.dark_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let prefs = Preferences::load(Arc::new(MemoryStore::new()));
        assert!(!prefs.dark_mode());
    }

    #[test]
    fn test_toggle_round_trips_through_storage() {
        let storage = Arc::new(MemoryStore::new());
        let mut prefs = Preferences::load(storage.clone());
        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(Preferences::load(storage).dark_mode());
    }
}
