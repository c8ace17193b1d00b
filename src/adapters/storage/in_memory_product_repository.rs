//! In-Memory Product Repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProductId};
use crate::domain::production::ProductRecipe;
use crate::ports::ProductRepository;

/// In-memory recipe storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    recipes: Arc<RwLock<HashMap<ProductId, ProductRecipe>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with `recipes` (useful for tests)
    pub fn with_recipes(recipes: impl IntoIterator<Item = ProductRecipe>) -> Self {
        let map = recipes.into_iter().map(|r| (r.id, r)).collect();
        Self {
            recipes: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, recipe: &ProductRecipe) -> Result<(), DomainError> {
        self.recipes.write().await.insert(recipe.id, recipe.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<ProductRecipe>, DomainError> {
        Ok(self.recipes.read().await.get(id).cloned())
    }
}
