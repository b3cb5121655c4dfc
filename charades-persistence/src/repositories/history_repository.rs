use charades_types::GameResult;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "@game_history";
pub const HISTORY_CAPACITY: usize = 50;

/// Finished games, newest first, capped at a fixed number of entries.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<GameResult>,
    capacity: usize,
    // Set while the stored record could not be read; saving then would
    // overwrite games we never saw.
    read_failed: bool,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_capacity(store, HISTORY_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            entries: Vec::new(),
            capacity: capacity.max(1),
            read_failed: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the persisted list. A missing or unreadable record is an empty
    /// history. If storage itself cannot be read, appends stay in memory
    /// until a later `load` succeeds.
    pub async fn load(&mut self) -> Vec<GameResult> {
        self.read_failed = false;
        self.entries = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<GameResult>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(self.capacity);
                    entries
                }
                Err(e) => {
                    warn!("Ignoring malformed game history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Error loading game history: {:#}", e);
                self.read_failed = true;
                Vec::new()
            }
        };
        debug!("Loaded {} history entries", self.entries.len());
        self.entries.clone()
    }

    pub fn list(&self) -> &[GameResult] {
        &self.entries
    }

    /// The `n` most recent games.
    pub fn recent(&self, n: usize) -> &[GameResult] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a finished game at the front of the list, dropping the oldest
    /// entries beyond capacity.
    pub async fn append(&mut self, result: GameResult) {
        debug!("Recording game {} ({})", result.id, result.category);
        self.entries.insert(0, result);
        self.entries.truncate(self.capacity);

        if self.read_failed {
            warn!("Game history was not loaded, keeping the new game in memory only");
            return;
        }

        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error encoding game history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_KEY, &raw).await {
            error!("Error saving game history: {:#}", e);
        }
    }

    /// Remove every entry. On a storage failure the in-memory list is kept so
    /// it still matches what a reload would return.
    pub async fn clear(&mut self) -> bool {
        match self.store.remove(HISTORY_KEY).await {
            Ok(()) => {
                self.entries.clear();
                true
            }
            Err(e) => {
                error!("Error clearing game history: {:#}", e);
                false
            }
        }
    }
}
