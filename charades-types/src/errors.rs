use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("a game needs at least one named player")]
    NoPlayers,
    #[error("cannot {action} while the game is {current_state}")]
    InvalidGameState {
        action: String,
        current_state: String,
    },
    #[error("round time {seconds}s is outside 10-300 seconds")]
    RoundTimeOutOfRange { seconds: u32 },
    #[error("card count {count} is outside 3-50 cards")]
    CardCountOutOfRange { count: u32 },
    #[error("not a whole number: {input:?}")]
    NotANumber { input: String },
}
