use anyhow::{Context, Result, anyhow};
use charades_types::{Category, CategorySelection};
use std::collections::HashSet;

/// Label used for games drawn from every category, and for unknown ids.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

const BUILTIN_CATEGORIES: &str = include_str!("../data/categories.json");

#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// The K-Pop / K-Drama categories bundled with the game
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATEGORIES).context("Bundled category data is invalid")
    }

    /// Load a catalog from a JSON array of categories
    pub fn from_json(json: &str) -> Result<Self> {
        let categories: Vec<Category> =
            serde_json::from_str(json).context("Failed to parse category data")?;
        Self::from_categories(categories)
    }

    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(anyhow!("Duplicate category id: {}", category.id));
            }
            if category.words.is_empty() {
                return Err(anyhow!("Category {} has no words", category.id));
            }
            if let Some(blank) = category.words.iter().find(|w| w.value.trim().is_empty()) {
                return Err(anyhow!(
                    "Category {} has a blank word ({})",
                    category.id,
                    blank.id
                ));
            }
        }

        Ok(Self { categories })
    }

    /// Categories in the order they were defined
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Display name for a selection, falling back to the all-categories
    /// label when the id is unknown.
    pub fn category_label(&self, selection: &CategorySelection) -> String {
        match selection {
            CategorySelection::Category(id) => self
                .find_category(id)
                .map(|category| category.name.clone())
                .unwrap_or_else(|| ALL_CATEGORIES_LABEL.to_string()),
            CategorySelection::All => ALL_CATEGORIES_LABEL.to_string(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }
}
