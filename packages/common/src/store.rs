use async_trait::async_trait;
use thiserror::Error;

use crate::recipe::{Recipe, RecipeFields};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe not found: {0}")]
    NotFound(String),
    /// Opaque backend failure; nothing was written.
    #[error("recipe store failure: {0}")]
    Backend(String),
}

/// Persistence for recipes.
///
/// Writes are atomic: a failed call leaves no partial record behind.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes, newest-created first.
    async fn list_all(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Insert a new recipe and return it with its assigned id and timestamps.
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError>;

    /// Replace every mutable field of an existing recipe.
    async fn update(&self, id: &str, fields: RecipeFields) -> Result<Recipe, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
