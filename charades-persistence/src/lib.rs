pub mod connection;
pub mod entities;
pub mod repositories;
pub mod store;

pub use repositories::{HISTORY_CAPACITY, HISTORY_KEY, HistoryStore, SETTINGS_KEY, SettingsStore};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
