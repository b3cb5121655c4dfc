use anyhow::{Context, Result};
use charades_core::{CategoryCatalog, Game, ThreadRngShuffler, WordSampler, WordShuffler};
use charades_persistence::connection::connect_and_migrate;
use charades_persistence::{HistoryStore, KeyValueStore, SettingsStore, SqliteStore};
use charades_types::{
    Category, CategorySelection, GameError, GameResult, GameSettings, SettingsPatch,
};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::cues::{CueSink, SilentCues};
use crate::recorder::{HistoryCommand, HistoryRecorder, run_history_writer};
use crate::session::GameSession;

type ShufflerFactory = Box<dyn Fn() -> Box<dyn WordShuffler> + Send + Sync>;

/// Application root: the word catalog, saved preferences and game history,
/// and the factory for new game sessions.
pub struct CharadesApp {
    catalog: Arc<CategoryCatalog>,
    settings: Mutex<SettingsStore>,
    settings_tx: watch::Sender<GameSettings>,
    history: Arc<Mutex<HistoryStore>>,
    history_tx: mpsc::UnboundedSender<HistoryCommand>,
    writer: JoinHandle<()>,
    cues: Arc<dyn CueSink>,
    shuffler_factory: ShufflerFactory,
}

impl CharadesApp {
    /// Open device storage at `config.database_url` and load the built-in
    /// catalog.
    pub async fn open(config: &Config) -> Result<Self> {
        let db = connect_and_migrate(&config.database_url)
            .await
            .with_context(|| format!("Failed to open storage at {}", config.database_url))?;
        let catalog = CategoryCatalog::builtin().context("Failed to load built-in categories")?;

        let store = Arc::new(SqliteStore::new(db));
        Ok(Self::with_store(store, Arc::new(catalog), config.history_capacity).await)
    }

    /// Build on any key-value backend. Must be called inside a Tokio runtime.
    pub async fn with_store(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<CategoryCatalog>,
        history_capacity: usize,
    ) -> Self {
        let mut settings = SettingsStore::new(store.clone());
        let current = settings.load().await;

        let mut history = HistoryStore::with_capacity(store, history_capacity);
        history.load().await;
        let history = Arc::new(Mutex::new(history));

        let (history_tx, history_rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_history_writer(history.clone(), history_rx));
        let (settings_tx, _) = watch::channel(current);

        info!(
            "Loaded {} categories ({} words)",
            catalog.list_categories().len(),
            catalog.word_count()
        );

        Self {
            catalog,
            settings: Mutex::new(settings),
            settings_tx,
            history,
            history_tx,
            writer,
            cues: Arc::new(SilentCues),
            shuffler_factory: Box::new(|| -> Box<dyn WordShuffler> {
                Box::new(ThreadRngShuffler)
            }),
        }
    }

    pub fn with_cues(mut self, cues: Arc<dyn CueSink>) -> Self {
        self.cues = cues;
        self
    }

    /// Replace how each new game's batches are shuffled.
    pub fn with_shuffler_factory<F, S>(mut self, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: WordShuffler + 'static,
    {
        self.shuffler_factory =
            Box::new(move || -> Box<dyn WordShuffler> { Box::new(factory()) });
        self
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[Category] {
        self.catalog.list_categories()
    }

    pub fn settings(&self) -> GameSettings {
        self.settings_tx.borrow().clone()
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> GameSettings {
        let updated = self.settings.lock().await.update(patch).await;
        self.publish_settings(updated)
    }

    pub async fn set_round_time_from_input(&self, input: &str) -> GameSettings {
        let updated = self.settings.lock().await.set_round_time_from_input(input).await;
        self.publish_settings(updated)
    }

    pub async fn set_card_count_from_input(&self, input: &str) -> GameSettings {
        let updated = self.settings.lock().await.set_card_count_from_input(input).await;
        self.publish_settings(updated)
    }

    fn publish_settings(&self, settings: GameSettings) -> GameSettings {
        self.settings_tx.send_if_modified(|current| {
            if *current == settings {
                false
            } else {
                *current = settings.clone();
                true
            }
        });
        settings
    }

    /// Every recorded game, newest first, including games that ended just
    /// before this call.
    pub async fn history(&self) -> Vec<GameResult> {
        self.flush_history().await;
        self.history.lock().await.list().to_vec()
    }

    pub async fn recent_history(&self, n: usize) -> Vec<GameResult> {
        self.flush_history().await;
        self.history.lock().await.recent(n).to_vec()
    }

    pub async fn clear_history(&self) -> bool {
        self.flush_history().await;
        self.history.lock().await.clear().await
    }

    async fn flush_history(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        let queued = self.history_tx.send(HistoryCommand::Flush(done_tx)).is_ok();
        if !queued || done_rx.await.is_err() {
            warn!("History writer is not running");
        }
    }

    /// Set up a game over `category_id` (or `"all"`) with the current
    /// settings. Finished games are recorded in the history automatically.
    pub fn new_game(
        &self,
        player_names: Vec<String>,
        category_id: &str,
    ) -> Result<GameSession, GameError> {
        let shuffler = (self.shuffler_factory)();
        let sampler = WordSampler::with_boxed_shuffler(self.catalog.clone(), shuffler);
        let mut game = Game::new(
            player_names,
            CategorySelection::from_id(category_id),
            self.settings(),
            sampler,
        )?;
        game.add_handler(Box::new(HistoryRecorder::new(self.history_tx.clone())));

        Ok(GameSession::new(game, self.cues.clone(), self.settings_tx.subscribe()))
    }

    /// Wait for queued history writes. Sessions still alive keep the writer
    /// open, so drop them first.
    pub async fn shutdown(self) {
        let Self {
            history_tx, writer, ..
        } = self;
        drop(history_tx);
        if let Err(e) = writer.await {
            warn!("History writer ended abnormally: {}", e);
        }
    }
}
