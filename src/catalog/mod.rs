mod types;

use std::collections::HashSet;

use thiserror::Error;

pub use types::{Category, Difficulty, GameModule, Icon};

/// Reserved pseudo-category meaning "no category filter". Never a real
/// `Category` record.
pub const ALL_CATEGORY_ID: &str = "all";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),
    #[error("duplicate game id: {0}")]
    DuplicateGame(String),
    #[error("\"all\" is reserved and cannot be used as a category id")]
    ReservedCategoryId,
}

/// Immutable collection of every category and game module, populated once at
/// process start. Queries are pure; there is no mutation API.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    games: Vec<GameModule>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, games: Vec<GameModule>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if category.id == ALL_CATEGORY_ID {
                return Err(CatalogError::ReservedCategoryId);
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut game_ids = HashSet::new();
        for game in &games {
            if !game_ids.insert(game.id.as_str()) {
                return Err(CatalogError::DuplicateGame(game.id.clone()));
            }
            // Tolerated: the filter treats such a game as matching only the
            // "all" pseudo-category.
            if !category_ids.contains(game.category.as_str()) {
                tracing::warn!(
                    game_id = %game.id,
                    category = %game.category,
                    "game references a category with no record"
                );
            }
        }

        Ok(Self { categories, games })
    }

    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            games: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn games(&self) -> &[GameModule] {
        &self.games
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn game(&self, id: &str) -> Option<&GameModule> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
