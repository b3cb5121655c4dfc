use charades_types::{
    AnsweredWord, CategorySelection, GameError, GameMode, GamePhase, GameResult, GameSettings,
    PlayerSession, PlayerSummary, RoundSnapshot, SampledWord,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{GameEvent, GameEventBus, GameEventHandler, ScoringEngine, TurnEndReason, WordSampler};

/// Turn and round state machine for one pass-the-phone game.
///
/// Phases run `Ready -> Playing -> (BetweenTurns -> Ready -> Playing)* -> Ended`.
/// The machine holds no clock: the caller reports `time_up` when the turn's
/// countdown expires.
#[derive(Debug)]
pub struct Game {
    players: Vec<PlayerSession>,
    phase: GamePhase,
    current_player_index: usize,
    current_word_index: usize,
    word_batch: Vec<SampledWord>,
    selection: CategorySelection,
    category_label: String,
    settings: GameSettings,
    sampler: WordSampler,
    started_at: Option<DateTime<Utc>>,
    turn_generation: u64,
    last_result: Option<GameResult>,
    event_bus: GameEventBus,
}

impl Game {
    /// Set up a game in `Ready` with the first player's batch dealt.
    /// Blank names are dropped; at least one player must remain.
    pub fn new(
        player_names: Vec<String>,
        selection: CategorySelection,
        settings: GameSettings,
        sampler: WordSampler,
    ) -> Result<Self, GameError> {
        let players: Vec<PlayerSession> = player_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(PlayerSession::new)
            .collect();

        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let category_label = sampler.catalog().category_label(&selection);

        let mut game = Self {
            players,
            phase: GamePhase::Ready,
            current_player_index: 0,
            current_word_index: 0,
            word_batch: Vec::new(),
            selection,
            category_label,
            settings,
            sampler,
            started_at: None,
            turn_generation: 0,
            last_result: None,
            event_bus: GameEventBus::new(),
        };
        game.deal_batch();

        info!(
            "Created game in {} for {} player(s), {} words per turn",
            game.category_label,
            game.players.len(),
            game.word_batch.len()
        );

        Ok(game)
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[PlayerSession] {
        &self.players
    }

    pub fn current_player(&self) -> &PlayerSession {
        &self.players[self.current_player_index]
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn word_batch(&self) -> &[SampledWord] {
        &self.word_batch
    }

    pub fn current_word(&self) -> Option<&SampledWord> {
        match self.phase {
            GamePhase::Playing => self.word_batch.get(self.current_word_index),
            _ => None,
        }
    }

    pub fn is_multiplayer(&self) -> bool {
        self.players.len() > 1
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Bumped on every `start`; lets a clock tell whether the turn it was
    /// started for is still the one being played.
    pub fn turn_generation(&self) -> u64 {
        self.turn_generation
    }

    /// When the first player's first turn began. Later turns do not move it;
    /// this is the date recorded on the game's result.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Result recorded by the most recent transition into `Ended`.
    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    /// New settings only take effect at the next batch draw; the batch
    /// already dealt is never resized.
    pub fn apply_settings(&mut self, settings: GameSettings) {
        if settings != self.settings {
            debug!("Settings updated, applying from the next deal");
            self.settings = settings;
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            category: self.category_label.clone(),
            players: self.players.clone(),
            current_player_index: self.current_player_index,
            current_word_index: self.current_word_index,
            word_batch: self.word_batch.clone(),
            current_word: self.current_word().cloned(),
            is_multiplayer: self.is_multiplayer(),
        }
    }

    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.players.iter().map(ScoringEngine::summarize).collect()
    }

    /// `Ready -> Playing`
    pub fn start(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::Ready, "start")?;

        self.started_at.get_or_insert_with(Utc::now);
        self.current_word_index = 0;
        self.turn_generation += 1;
        self.set_phase(GamePhase::Playing);

        let player_index = self.current_player_index;
        self.event_bus.publish(GameEvent::TurnStarted {
            player_index,
            player: self.players[player_index].name.clone(),
            batch_size: self.word_batch.len(),
            generation: self.turn_generation,
        });

        if self.word_batch.is_empty() {
            self.finish_turn(TurnEndReason::WordsExhausted);
        }

        Ok(self.phase)
    }

    pub fn mark_correct(&mut self) -> Result<GamePhase, GameError> {
        self.answer(true, "mark a word correct")
    }

    pub fn mark_skip(&mut self) -> Result<GamePhase, GameError> {
        self.answer(false, "skip a word")
    }

    /// The turn's countdown reached zero. Handled like running out of words,
    /// however many remain.
    pub fn time_up(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::Playing, "run out of time")?;
        self.finish_turn(TurnEndReason::TimeUp);
        Ok(self.phase)
    }

    /// `BetweenTurns -> Ready` for the next player, with a freshly drawn batch.
    pub fn next_player(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::BetweenTurns, "move to the next player")?;

        self.current_player_index += 1;
        self.deal_batch();
        self.set_phase(GamePhase::Ready);

        let player_index = self.current_player_index;
        self.event_bus.publish(GameEvent::NextPlayerReady {
            player_index,
            player: self.players[player_index].name.clone(),
            batch_size: self.word_batch.len(),
        });

        Ok(self.phase)
    }

    /// Back to the first player's `Ready` with every score cleared and a new
    /// batch. Player names are kept. Accepted from any phase.
    pub fn restart(&mut self) -> GamePhase {
        for player in &mut self.players {
            player.reset();
        }
        self.current_player_index = 0;
        self.started_at = None;
        self.last_result = None;
        self.deal_batch();
        self.set_phase(GamePhase::Ready);

        info!("Game restarted in {}", self.category_label);
        self.event_bus.publish(GameEvent::GameRestarted {
            batch_size: self.word_batch.len(),
        });

        self.phase
    }

    /// `Playing -> Ready` without finishing the turn: the current player's
    /// answers are discarded and they replay the same batch.
    pub fn cancel_turn(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::Playing, "cancel the turn")?;

        let player_index = self.current_player_index;
        let player = &mut self.players[player_index];
        player.reset();
        player.turn_total = self.word_batch.len() as u32;
        self.current_word_index = 0;
        self.set_phase(GamePhase::Ready);

        debug!("Turn cancelled for player {}", player_index);
        self.event_bus.publish(GameEvent::TurnCancelled { player_index });

        Ok(self.phase)
    }

    fn answer(&mut self, correct: bool, action: &str) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::Playing, action)?;

        let word = self.word_batch[self.current_word_index].value.clone();
        let player_index = self.current_player_index;
        let player = &mut self.players[player_index];
        if correct {
            player.score += 1;
        } else {
            player.skipped_count += 1;
        }
        player.answered_words.push(AnsweredWord {
            word_value: word.clone(),
            was_correct: correct,
        });
        self.current_word_index += 1;

        debug!("Player {} answered {:?} (correct: {})", player_index, word, correct);
        self.event_bus.publish(GameEvent::WordAnswered {
            player_index,
            word,
            correct,
        });

        if self.current_word_index >= self.word_batch.len() {
            self.finish_turn(TurnEndReason::WordsExhausted);
        }

        Ok(self.phase)
    }

    fn finish_turn(&mut self, reason: TurnEndReason) {
        let player_index = self.current_player_index;
        let player = &self.players[player_index];
        self.event_bus.publish(GameEvent::TurnCompleted {
            player_index,
            reason,
            score: player.score,
            skipped_count: player.skipped_count,
        });

        if self.is_multiplayer() && player_index + 1 < self.players.len() {
            self.set_phase(GamePhase::BetweenTurns);
        } else {
            self.end_game();
        }
    }

    /// The only place a result is produced, so each play-through records
    /// exactly one.
    fn end_game(&mut self) {
        self.set_phase(GamePhase::Ended);

        let mode = if self.is_multiplayer() {
            GameMode::Multiplayer
        } else {
            GameMode::Single
        };
        let result = GameResult {
            id: Uuid::new_v4().to_string(),
            date: self.started_at.unwrap_or_else(Utc::now),
            mode,
            category: self.category_label.clone(),
            scores: self.players.iter().map(ScoringEngine::player_score).collect(),
        };

        info!(
            "Game {} ended in {}: {}",
            result.id,
            result.category,
            result
                .scores
                .iter()
                .map(|s| format!("{} {}/{}", s.player, s.score, s.total))
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.last_result = Some(result.clone());
        self.event_bus.publish(GameEvent::GameEnded { result });
    }

    fn deal_batch(&mut self) {
        let count = self.settings.batch_size();
        self.word_batch = self.sampler.sample(&self.selection, count);
        self.current_word_index = 0;
        self.players[self.current_player_index].turn_total = self.word_batch.len() as u32;
    }

    fn expect_phase(&self, expected: GamePhase, action: &str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidGameState {
                action: action.to_string(),
                current_state: self.phase.as_str().to_string(),
            })
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
        }
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryCatalog, IdentityShuffler};
    use std::sync::Arc;

    fn create_game(names: &[&str], card_count: u32) -> Game {
        let catalog = Arc::new(CategoryCatalog::builtin().unwrap());
        let settings = GameSettings {
            card_count: charades_types::CardCount::Fixed(card_count),
            ..GameSettings::default()
        };
        Game::new(
            names.iter().map(|n| n.to_string()).collect(),
            CategorySelection::from_id("songs"),
            settings,
            WordSampler::with_shuffler(catalog, IdentityShuffler),
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_is_ready() {
        let game = create_game(&["Mina", "Joon"], 5);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.current_word_index(), 0);
        assert_eq!(game.word_batch().len(), 5);
        assert_eq!(game.players()[0].turn_total, 5);
        assert!(game.current_word().is_none());
        assert!(game.is_multiplayer());
        assert_eq!(game.category_label(), "Hit Songs");
    }

    #[test]
    fn test_blank_names_dropped() {
        let game = create_game(&["  Mina  ", "", "   "], 5);
        assert_eq!(game.players().len(), 1);
        assert_eq!(game.players()[0].name, "Mina");
        assert!(!game.is_multiplayer());
    }

    #[test]
    fn test_no_players_rejected() {
        let catalog = Arc::new(CategoryCatalog::builtin().unwrap());
        let result = Game::new(
            vec![" ".to_string()],
            CategorySelection::All,
            GameSettings::default(),
            WordSampler::new(catalog),
        );
        assert_eq!(result.unwrap_err(), GameError::NoPlayers);
    }

    #[test]
    fn test_wrong_phase_leaves_state_unchanged() {
        let mut game = create_game(&["Mina"], 5);
        let before = game.snapshot();

        let err = game.mark_correct().unwrap_err();
        assert!(matches!(err, GameError::InvalidGameState { .. }));
        assert!(err.to_string().contains("ready"));
        assert!(game.time_up().is_err());
        assert!(game.next_player().is_err());
        assert!(game.cancel_turn().is_err());
        assert_eq!(game.snapshot(), before);

        game.start().unwrap();
        assert!(game.start().is_err());
    }

    #[test]
    fn test_current_word_follows_pointer() {
        let mut game = create_game(&["Mina"], 3);
        game.start().unwrap();
        assert_eq!(game.current_word().unwrap().value, "Gangnam Style");
        game.mark_skip().unwrap();
        assert_eq!(game.current_word().unwrap().value, "Dynamite");
        assert_eq!(game.current_word_index(), 1);
    }

    #[test]
    fn test_started_at_is_first_start() {
        let mut game = create_game(&["Mina", "Joon"], 3);
        game.start().unwrap();
        let first = game.started_at().unwrap();
        game.time_up().unwrap();
        game.next_player().unwrap();
        game.start().unwrap();
        assert_eq!(game.started_at(), Some(first));
        game.time_up().unwrap();
        assert_eq!(game.last_result().unwrap().date, first);

        game.restart();
        assert!(game.started_at().is_none());
    }
}
