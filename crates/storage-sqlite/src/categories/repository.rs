use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use charity_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use charity_core::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::categories;
use crate::utils::chunk_for_sqlite;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .order(categories::name.asc())
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_by_ids(&self, category_ids: &[String]) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let mut result = Vec::new();
        for chunk in chunk_for_sqlite(category_ids) {
            let rows = categories::table
                .filter(categories::id.eq_any(chunk))
                .select(CategoryDB::as_select())
                .load::<CategoryDB>(&mut conn)
                .map_err(StorageError::from)?;
            result.extend(rows.into_iter().map(Category::from));
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = CategoryDB {
                    id: Uuid::now_v7().to_string(),
                    name: new_category.name,
                };
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(inserted))
            })
            .await
    }

    async fn delete(&self, category_id: &str) -> Result<usize> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
