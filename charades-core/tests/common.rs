#![allow(dead_code)]

use charades_core::{
    CategoryCatalog, Game, GameEvent, GameEventHandler, IdentityShuffler, WordSampler,
};
use charades_types::{CardCount, CategorySelection, GameResult, GameSettings};
use std::sync::{Arc, Mutex};

pub fn create_test_catalog() -> Arc<CategoryCatalog> {
    Arc::new(CategoryCatalog::builtin().unwrap())
}

/// Settings with a fixed number of cards per turn
pub fn settings_with_cards(card_count: u32) -> GameSettings {
    GameSettings {
        round_time_seconds: 60,
        card_count: CardCount::Fixed(card_count),
        sound_enabled: true,
    }
}

/// Creates a game over the given category using the real random shuffler
pub fn create_game(category: &str, players: &[&str], settings: GameSettings) -> Game {
    Game::new(
        players.iter().map(|p| p.to_string()).collect(),
        CategorySelection::from_id(category),
        settings,
        WordSampler::new(create_test_catalog()),
    )
    .unwrap()
}

/// Creates a game whose batches come out in catalog order
pub fn create_ordered_game(category: &str, players: &[&str], settings: GameSettings) -> Game {
    Game::new(
        players.iter().map(|p| p.to_string()).collect(),
        CategorySelection::from_id(category),
        settings,
        WordSampler::with_shuffler(create_test_catalog(), IdentityShuffler),
    )
    .unwrap()
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, game: &mut Game) {
        game.add_handler(Box::new(self.clone()));
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn ended_results(&self) -> Vec<GameResult> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                GameEvent::GameEnded { result } => Some(result.clone()),
                _ => None,
            })
            .collect()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Answers `correct` words then skips `skipped` words for the current player
pub fn play_answers(game: &mut Game, correct: usize, skipped: usize) {
    for _ in 0..correct {
        game.mark_correct().unwrap();
    }
    for _ in 0..skipped {
        game.mark_skip().unwrap();
    }
}
