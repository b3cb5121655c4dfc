#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use charades_core::{CategoryCatalog, IdentityShuffler};
use charades_persistence::{KeyValueStore, MemoryStore};
use charades_session::{CharadesApp, Cue, CueSink, GameSession};
use charades_types::{CardCount, SettingsPatch};
use std::sync::{Arc, Mutex};

/// Cue sink that remembers what it was asked to play
#[derive(Clone, Default)]
pub struct RecordingCues {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingCues {
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }
}

impl CueSink for RecordingCues {
    fn play(&self, cue: Cue) {
        self.played.lock().unwrap().push(cue);
    }
}

/// Storage that is never available
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("storage unavailable")
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        bail!("storage unavailable")
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        bail!("storage unavailable")
    }
}

pub fn create_test_catalog() -> Arc<CategoryCatalog> {
    Arc::new(CategoryCatalog::builtin().unwrap())
}

/// App over the given store whose batches come out in catalog order
pub async fn create_app_with_store(store: Arc<dyn KeyValueStore>) -> CharadesApp {
    CharadesApp::with_store(store, create_test_catalog(), 50)
        .await
        .with_shuffler_factory(|| IdentityShuffler)
}

pub async fn create_app() -> (Arc<MemoryStore>, CharadesApp) {
    let store = Arc::new(MemoryStore::new());
    let app = create_app_with_store(store.clone()).await;
    (store, app)
}

pub async fn set_card_count(app: &CharadesApp, count: u32) {
    app.update_settings(SettingsPatch::card_count(CardCount::Fixed(count)))
        .await;
}

pub fn names(players: &[&str]) -> Vec<String> {
    players.iter().map(|p| p.to_string()).collect()
}

pub async fn play_answers(session: &GameSession, correct: usize, skipped: usize) {
    for _ in 0..correct {
        session.mark_correct().await.unwrap();
    }
    for _ in 0..skipped {
        session.mark_skip().await.unwrap();
    }
}
