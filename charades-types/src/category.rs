use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sentinel category id meaning "draw from every category".
pub const ALL_CATEGORIES_ID: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordEntry {
    pub id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub color: String, // Hex accent, e.g. "#FF0099"
    pub words: Vec<WordEntry>,
}

/// A word drawn for a round, tagged with the category it came from so the
/// card can show the source even when every category is pooled together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SampledWord {
    pub id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub difficulty: Option<Difficulty>,
    pub category: String,
    pub category_color: String,
}

impl WordEntry {
    /// Copy this entry with its source category's display name and colour.
    pub fn annotate(&self, category: &Category) -> SampledWord {
        SampledWord {
            id: self.id.clone(),
            value: self.value.clone(),
            difficulty: self.difficulty,
            category: category.name.clone(),
            category_color: category.color.clone(),
        }
    }
}

/// Which pool a game draws its words from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategorySelection {
    All,
    Category(String),
}

impl CategorySelection {
    /// Interpret a routing parameter; `"all"` selects the pooled mode.
    pub fn from_id(id: &str) -> Self {
        if id == ALL_CATEGORIES_ID {
            CategorySelection::All
        } else {
            CategorySelection::Category(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES_ID,
            CategorySelection::Category(id) => id,
        }
    }
}
