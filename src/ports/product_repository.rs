//! Product repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductId};
use crate::domain::production::ProductRecipe;

/// Stores product recipes.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or replace a recipe.
    async fn save(&self, recipe: &ProductRecipe) -> Result<(), DomainError>;

    /// Find a recipe by product id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<ProductRecipe>, DomainError>;
}
