//! High score persistence
//!
//! The core only needs to read one integer at startup and write it back when
//! a session beats it.

use crate::persistence::{KeyValueStore, StorageError};

/// Persistence port for the best score
pub trait HighScorePort {
    fn get(&self) -> u64;
    fn set(&mut self, score: u64);
}

/// High score kept in a `KeyValueStore` under a single key
pub struct StoredHighScore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoredHighScore<S> {
    /// Storage key (shared with older builds of the game)
    pub const STORAGE_KEY: &'static str = "dinoHighScore";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read(&self) -> Result<u64, StorageError> {
        match self.store.get_item(Self::STORAGE_KEY)? {
            None => Ok(0),
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                StorageError::Parse {
                    key: Self::STORAGE_KEY.to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }
}

impl<S: KeyValueStore> HighScorePort for StoredHighScore<S> {
    fn get(&self) -> u64 {
        match self.read() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("High score unreadable, starting at 0: {}", e);
                0
            }
        }
    }

    fn set(&mut self, score: u64) {
        match self.store.set_item(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved: {}", score),
            Err(e) => log::warn!("High score not saved: {}", e),
        }
    }
}

/// Volatile high score for headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    pub score: u64,
}

impl HighScorePort for MemoryHighScore {
    fn get(&self) -> u64 {
        self.score
    }

    fn set(&mut self, score: u64) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_key_reads_zero() {
        let hs = StoredHighScore::new(MemoryStore::new());
        assert_eq!(hs.get(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        let mut hs = StoredHighScore::new(store.clone());
        hs.set(1234);
        assert_eq!(hs.get(), 1234);
        assert_eq!(
            store.get_item(StoredHighScore::<MemoryStore>::STORAGE_KEY).unwrap().as_deref(),
            Some("1234")
        );
    }

    #[test]
    fn test_garbage_value_falls_back_to_zero() {
        let store = MemoryStore::new();
        store
            .set_item(StoredHighScore::<MemoryStore>::STORAGE_KEY, "lots")
            .unwrap();
        let hs = StoredHighScore::new(store);
        assert_eq!(hs.get(), 0);
    }
}
