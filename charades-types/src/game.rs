use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::SampledWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Ready,        // Waiting for the current player to press start
    Playing,      // Clock running, words on screen
    BetweenTurns, // Turn finished, next player still to go
    Ended,        // Every player has played
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::BetweenTurns => "between turns",
            GamePhase::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredWord {
    pub word_value: String,
    pub was_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSession {
    pub name: String,
    pub score: u32,
    pub skipped_count: u32,
    pub answered_words: Vec<AnsweredWord>,
    /// Size of the batch dealt for this player's turn.
    pub turn_total: u32,
}

impl PlayerSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            skipped_count: 0,
            answered_words: Vec::new(),
            turn_total: 0,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.skipped_count = 0;
        self.answered_words.clear();
        self.turn_total = 0;
    }

    pub fn answered_count(&self) -> u32 {
        self.score + self.skipped_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Single,
    Multiplayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub player: String,
    pub score: u32,
    pub total: u32,
    pub skipped_count: u32,
}

/// One finished game as stored in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameResult {
    pub id: String,
    pub date: DateTime<Utc>, // ISO 8601 on disk
    pub mode: GameMode,
    pub category: String,
    pub scores: Vec<PlayerScore>,
}

/// Read-only view of the round for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: GamePhase,
    pub category: String,
    pub players: Vec<PlayerSession>,
    pub current_player_index: usize,
    pub current_word_index: usize,
    pub word_batch: Vec<SampledWord>,
    pub current_word: Option<SampledWord>,
    pub is_multiplayer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Good,
    Fair,
    Poor,
}

/// Results-screen figures for one player. Rates are fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub player: String,
    pub score: u32,
    pub total: u32,
    pub skipped_count: u32,
    pub accuracy: f64,
    pub accuracy_tier: PerformanceTier,
    pub progress: f64,
    pub progress_tier: PerformanceTier,
    pub answered_words: Vec<AnsweredWord>,
}
