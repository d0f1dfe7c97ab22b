//! Persistence for high scores and preferences.
//!
//! Everything is stored as string values under string keys, the same flat
//! model a browser's local storage offers. The high-score list is stored as a
//! JSON array string under [`crate::types::HIGH_SCORES_KEY`].
//!
//! Persistence never interrupts the game: read failures fall back to defaults
//! and write failures are logged.

pub mod json_file;
pub mod memory;
pub mod shapes;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use json_file::{JsonFileStore, StoreDocument};
pub use memory::MemoryStore;
pub use shapes::{load_shape_set, parse_shape_set};

use crate::core::HighScoreList;
use crate::types::HIGH_SCORES_KEY;

/// Raw string key/value access.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;
}

/// The session-boundary persistence operations.
pub trait Persistence {
    fn load_high_scores(&mut self) -> HighScoreList;
    fn save_high_scores(&mut self, scores: &HighScoreList);
    fn load_preference(&mut self, key: &str) -> Option<String>;
    fn save_preference(&mut self, key: &str, value: &str);
}

impl<S: KeyValueStore> Persistence for S {
    fn load_high_scores(&mut self) -> HighScoreList {
        let Some(raw) = self.get(HIGH_SCORES_KEY) else {
            return HighScoreList::new();
        };
        match serde_json::from_str::<Vec<u32>>(&raw) {
            Ok(scores) => HighScoreList::from_scores(scores),
            Err(e) => {
                eprintln!("[Store] ignoring unreadable high scores: {}", e);
                HighScoreList::new()
            }
        }
    }

    fn save_high_scores(&mut self, scores: &HighScoreList) {
        let raw = match serde_json::to_string(scores.as_slice()) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("[Store] failed to encode high scores: {}", e);
                return;
            }
        };
        if let Err(e) = self.set(HIGH_SCORES_KEY, raw) {
            eprintln!("[Store] failed to save high scores: {:#}", e);
        }
    }

    fn load_preference(&mut self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save_preference(&mut self, key: &str, value: &str) {
        if let Err(e) = self.set(key, value.to_string()) {
            eprintln!("[Store] failed to save preference {}: {:#}", key, e);
        }
    }
}

/// Read a boolean preference stored as `"true"`/`"false"`.
pub fn load_bool_preference<P: Persistence + ?Sized>(store: &mut P, key: &str, default: bool) -> bool {
    match store.load_preference(key).as_deref() {
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            eprintln!("[Store] invalid value {:?} for {}, using {}", other, key, default);
            default
        }
        None => default,
    }
}

pub fn save_bool_preference<P: Persistence + ?Sized>(store: &mut P, key: &str, value: bool) {
    store.save_preference(key, if value { "true" } else { "false" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DYNAMIC_SPEED_KEY;

    #[test]
    fn test_high_scores_round_trip_through_string_value() {
        let mut store = MemoryStore::new();
        let scores = HighScoreList::from_scores([900, 300]);
        store.save_high_scores(&scores);

        assert_eq!(store.get(HIGH_SCORES_KEY).as_deref(), Some("[900,300]"));
        assert_eq!(store.load_high_scores(), scores);
    }

    #[test]
    fn test_corrupt_high_scores_fall_back_to_empty() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORES_KEY, "not json".to_string()).unwrap();
        assert!(store.load_high_scores().is_empty());
    }

    #[test]
    fn test_bool_preference_defaults() {
        let mut store = MemoryStore::new();
        assert!(load_bool_preference(&mut store, DYNAMIC_SPEED_KEY, true));

        save_bool_preference(&mut store, DYNAMIC_SPEED_KEY, false);
        assert!(!load_bool_preference(&mut store, DYNAMIC_SPEED_KEY, true));

        store.save_preference(DYNAMIC_SPEED_KEY, "maybe");
        assert!(load_bool_preference(&mut store, DYNAMIC_SPEED_KEY, true));
    }
}
