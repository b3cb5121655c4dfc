use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;
use ts_rs::TS;

use crate::GameError;

pub const ROUND_TIME_RANGE: RangeInclusive<u32> = 10..=300;
pub const CARD_COUNT_RANGE: RangeInclusive<u32> = 3..=50;

pub const DEFAULT_ROUND_TIME_SECONDS: u32 = 60;
pub const DEFAULT_CARD_COUNT: u32 = 10;

/// Quick-pick values offered next to the free-text inputs.
pub const PRESET_ROUND_TIMES: [u32; 3] = [30, 45, 60];
pub const PRESET_CARD_COUNTS: [u32; 4] = [5, 10, 15, 20];

/// Lower bound for the batch dealt when the card count is unlimited.
pub const UNLIMITED_MIN_BATCH: usize = 100;

const UNLIMITED: &str = "unlimited";

/// Words per turn. Persisted as a bare number or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCount {
    Fixed(u32),
    Unlimited,
}

impl CardCount {
    pub fn is_valid(&self) -> bool {
        match self {
            CardCount::Fixed(count) => CARD_COUNT_RANGE.contains(count),
            CardCount::Unlimited => true,
        }
    }
}

impl fmt::Display for CardCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardCount::Fixed(count) => write!(f, "{count}"),
            CardCount::Unlimited => f.write_str(UNLIMITED),
        }
    }
}

impl Serialize for CardCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CardCount::Fixed(count) => serializer.serialize_u32(*count),
            CardCount::Unlimited => serializer.serialize_str(UNLIMITED),
        }
    }
}

impl<'de> Deserialize<'de> for CardCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(count) => Ok(CardCount::Fixed(count)),
            Raw::Text(text) if text == UNLIMITED => Ok(CardCount::Unlimited),
            Raw::Text(text) => Err(de::Error::invalid_value(
                Unexpected::Str(&text),
                &"a card count or \"unlimited\"",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(rename = "roundTime")]
    pub round_time_seconds: u32,
    #[ts(type = "number | \"unlimited\"")]
    pub card_count: CardCount,
    pub sound_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_time_seconds: DEFAULT_ROUND_TIME_SECONDS,
            card_count: CardCount::Fixed(DEFAULT_CARD_COUNT),
            sound_enabled: true,
        }
    }
}

impl GameSettings {
    pub fn is_valid(&self) -> bool {
        ROUND_TIME_RANGE.contains(&self.round_time_seconds) && self.card_count.is_valid()
    }

    /// Number of words dealt per turn. Unlimited mode over-provisions so the
    /// clock almost always runs out before the words do.
    pub fn batch_size(&self) -> usize {
        match self.card_count {
            CardCount::Fixed(count) => count as usize,
            CardCount::Unlimited => {
                UNLIMITED_MIN_BATCH.max(self.round_time_seconds as usize * 2)
            }
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub round_time_seconds: Option<u32>,
    pub card_count: Option<CardCount>,
    pub sound_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn round_time(seconds: u32) -> Self {
        Self {
            round_time_seconds: Some(seconds),
            ..Self::default()
        }
    }

    pub fn card_count(card_count: CardCount) -> Self {
        Self {
            card_count: Some(card_count),
            ..Self::default()
        }
    }

    pub fn sound(enabled: bool) -> Self {
        Self {
            sound_enabled: Some(enabled),
            ..Self::default()
        }
    }
}

pub fn validate_round_time(seconds: u32) -> Result<u32, GameError> {
    if ROUND_TIME_RANGE.contains(&seconds) {
        Ok(seconds)
    } else {
        Err(GameError::RoundTimeOutOfRange { seconds })
    }
}

pub fn validate_card_count(card_count: CardCount) -> Result<CardCount, GameError> {
    match card_count {
        CardCount::Fixed(count) if !CARD_COUNT_RANGE.contains(&count) => {
            Err(GameError::CardCountOutOfRange { count })
        }
        valid => Ok(valid),
    }
}

fn parse_whole_number(input: &str) -> Result<u32, GameError> {
    input.trim().parse::<u32>().map_err(|_| GameError::NotANumber {
        input: input.to_string(),
    })
}

/// Parse a free-text round time entry.
pub fn parse_round_time(input: &str) -> Result<u32, GameError> {
    validate_round_time(parse_whole_number(input)?)
}

/// Parse a free-text card count entry. Only numbers are accepted here;
/// unlimited is picked from its own toggle.
pub fn parse_card_count(input: &str) -> Result<CardCount, GameError> {
    validate_card_count(CardCount::Fixed(parse_whole_number(input)?))
}
