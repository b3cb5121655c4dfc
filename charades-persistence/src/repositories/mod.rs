pub mod history_repository;
pub mod settings_repository;

pub use history_repository::{HISTORY_CAPACITY, HISTORY_KEY, HistoryStore};
pub use settings_repository::{SETTINGS_KEY, SettingsStore};
