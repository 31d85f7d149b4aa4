use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// All categories ordered by name.
    fn list(&self) -> Result<Vec<Category>>;
    /// The categories whose id is in `category_ids`; unknown ids are skipped.
    fn get_by_ids(&self, category_ids: &[String]) -> Result<Vec<Category>>;
    async fn create(&self, new_category: NewCategory) -> Result<Category>;
    async fn delete(&self, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn delete_category(&self, category_id: &str) -> Result<usize>;
}
