use log::info;
use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Result};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let created = self.repository.create(new_category.validated()?).await?;
        info!("Created category {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn delete_category(&self, category_id: &str) -> Result<usize> {
        let deleted = self.repository.delete(category_id).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("Category {category_id}")).into());
        }
        Ok(deleted)
    }
}
