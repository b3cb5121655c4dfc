use charades_types::{
    parse_card_count, parse_round_time, validate_card_count, validate_round_time, CardCount,
    GameSettings, SettingsPatch,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::store::KeyValueStore;

pub const SETTINGS_KEY: &str = "@game_settings";

/// Persisted game preferences. Every update is written through to storage
/// before it returns; a failed write is logged and the in-memory value still
/// applies for the rest of the session.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    current: GameSettings,
}

impl SettingsStore {
    /// Starts from defaults; call `load` to read the persisted record.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: GameSettings::default(),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.current
    }

    /// Read the persisted record. Missing, unreadable or out-of-range records
    /// fall back to the defaults.
    pub async fn load(&mut self) -> GameSettings {
        self.current = match self.store.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => Self::parse_record(&raw),
            Ok(None) => GameSettings::default(),
            Err(e) => {
                error!("Error loading settings: {:#}", e);
                GameSettings::default()
            }
        };
        self.current.clone()
    }

    fn parse_record(raw: &str) -> GameSettings {
        match serde_json::from_str::<GameSettings>(raw) {
            Ok(settings) if settings.is_valid() => settings,
            Ok(settings) => {
                warn!("Ignoring out-of-range stored settings: {:?}", settings);
                GameSettings::default()
            }
            Err(e) => {
                warn!("Ignoring malformed stored settings: {}", e);
                GameSettings::default()
            }
        }
    }

    /// Merge a partial update. Fields outside their valid range are dropped
    /// and keep the previous value; the rest of the patch still applies.
    pub async fn update(&mut self, patch: SettingsPatch) -> GameSettings {
        let mut updated = self.current.clone();

        if let Some(seconds) = patch.round_time_seconds {
            match validate_round_time(seconds) {
                Ok(seconds) => updated.round_time_seconds = seconds,
                Err(e) => debug!("Rejected round time: {}", e),
            }
        }
        if let Some(card_count) = patch.card_count {
            match validate_card_count(card_count) {
                Ok(card_count) => updated.card_count = card_count,
                Err(e) => debug!("Rejected card count: {}", e),
            }
        }
        if let Some(enabled) = patch.sound_enabled {
            updated.sound_enabled = enabled;
        }

        self.current = updated;
        self.persist().await;
        self.current.clone()
    }

    pub async fn set_round_time(&mut self, seconds: u32) -> GameSettings {
        self.update(SettingsPatch::round_time(seconds)).await
    }

    pub async fn set_card_count(&mut self, card_count: CardCount) -> GameSettings {
        self.update(SettingsPatch::card_count(card_count)).await
    }

    pub async fn set_sound_enabled(&mut self, enabled: bool) -> GameSettings {
        self.update(SettingsPatch::sound(enabled)).await
    }

    /// Apply a round time typed into the custom field. Anything that is not a
    /// whole number in range leaves the settings untouched.
    pub async fn set_round_time_from_input(&mut self, input: &str) -> GameSettings {
        match parse_round_time(input) {
            Ok(seconds) => self.set_round_time(seconds).await,
            Err(e) => {
                debug!("Rejected round time input: {}", e);
                self.current.clone()
            }
        }
    }

    pub async fn set_card_count_from_input(&mut self, input: &str) -> GameSettings {
        match parse_card_count(input) {
            Ok(card_count) => self.set_card_count(card_count).await,
            Err(e) => {
                debug!("Rejected card count input: {}", e);
                self.current.clone()
            }
        }
    }

    async fn persist(&self) {
        let raw = match serde_json::to_string(&self.current) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error encoding settings: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(SETTINGS_KEY, &raw).await {
            error!("Error saving settings: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn setup_store() -> (Arc<MemoryStore>, SettingsStore) {
        let backend = Arc::new(MemoryStore::new());
        let mut settings = SettingsStore::new(backend.clone());
        settings.load().await;
        (backend, settings)
    }

    async fn stored(backend: &MemoryStore) -> GameSettings {
        let raw = backend.get(SETTINGS_KEY).await.unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_nothing_stored() {
        let (backend, settings) = setup_store().await;
        assert_eq!(settings.settings(), &GameSettings::default());
        // Loading alone writes nothing
        assert!(backend.get(SETTINGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_time_range_enforced() {
        let (backend, mut settings) = setup_store().await;

        let after = settings.set_round_time(5).await;
        assert_eq!(after.round_time_seconds, 60);

        let after = settings.set_round_time(45).await;
        assert_eq!(after.round_time_seconds, 45);
        assert_eq!(stored(&backend).await.round_time_seconds, 45);

        let after = settings.set_round_time(301).await;
        assert_eq!(after.round_time_seconds, 45);
        assert_eq!(stored(&backend).await.round_time_seconds, 45);
    }

    #[tokio::test]
    async fn test_partial_patch_keeps_valid_fields() {
        let (backend, mut settings) = setup_store().await;

        let after = settings
            .update(SettingsPatch {
                round_time_seconds: Some(2),
                card_count: Some(CardCount::Fixed(20)),
                sound_enabled: Some(false),
            })
            .await;

        assert_eq!(after.round_time_seconds, 60);
        assert_eq!(after.card_count, CardCount::Fixed(20));
        assert!(!after.sound_enabled);
        assert_eq!(stored(&backend).await, after);
    }

    #[tokio::test]
    async fn test_card_count_updates() {
        let (_backend, mut settings) = setup_store().await;

        assert_eq!(
            settings.set_card_count(CardCount::Fixed(2)).await.card_count,
            CardCount::Fixed(10)
        );
        assert_eq!(
            settings.set_card_count(CardCount::Unlimited).await.card_count,
            CardCount::Unlimited
        );
        assert_eq!(
            settings.set_card_count_from_input("15").await.card_count,
            CardCount::Fixed(15)
        );
        assert_eq!(
            settings.set_card_count_from_input("lots").await.card_count,
            CardCount::Fixed(15)
        );
    }

    #[tokio::test]
    async fn test_free_text_round_time() {
        let (_backend, mut settings) = setup_store().await;

        assert_eq!(settings.set_round_time_from_input("90").await.round_time_seconds, 90);
        assert_eq!(settings.set_round_time_from_input("abc").await.round_time_seconds, 90);
        assert_eq!(settings.set_round_time_from_input("9").await.round_time_seconds, 90);
    }

    #[tokio::test]
    async fn test_reload_reads_persisted_record() {
        let (backend, mut settings) = setup_store().await;
        settings.set_round_time(120).await;
        settings.set_sound_enabled(false).await;

        let mut reopened = SettingsStore::new(backend);
        let loaded = reopened.load().await;
        assert_eq!(loaded.round_time_seconds, 120);
        assert!(!loaded.sound_enabled);
    }

    #[tokio::test]
    async fn test_malformed_record_falls_back_to_defaults() {
        let backend = Arc::new(MemoryStore::new());
        let mut settings = SettingsStore::new(backend.clone());

        backend.set(SETTINGS_KEY, "{ definitely not json").await.unwrap();
        assert_eq!(settings.load().await, GameSettings::default());

        backend
            .set(SETTINGS_KEY, r#"{"roundTime":5,"cardCount":10,"soundEnabled":true}"#)
            .await
            .unwrap();
        assert_eq!(settings.load().await, GameSettings::default());

        backend
            .set(SETTINGS_KEY, r#"{"roundTime":30,"cardCount":"unlimited","soundEnabled":false}"#)
            .await
            .unwrap();
        let loaded = settings.load().await;
        assert_eq!(loaded.round_time_seconds, 30);
        assert_eq!(loaded.card_count, CardCount::Unlimited);
    }
}
