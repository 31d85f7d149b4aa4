use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use charity_core::institutions::{
    Institution, InstitutionKind, InstitutionRepositoryTrait, NewInstitution,
};
use charity_core::{Error, Result};

use super::model::InstitutionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{donations, institutions};

pub struct InstitutionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InstitutionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        InstitutionRepository { pool, writer }
    }
}

fn to_domain(rows: Vec<InstitutionDB>) -> Result<Vec<Institution>> {
    rows.into_iter().map(Institution::try_from).collect()
}

#[async_trait]
impl InstitutionRepositoryTrait for InstitutionRepository {
    fn list(&self) -> Result<Vec<Institution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = institutions::table
            .order((institutions::created_at.asc(), institutions::id.asc()))
            .select(InstitutionDB::as_select())
            .load::<InstitutionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn get_by_id(&self, institution_id: &str) -> Result<Institution> {
        let mut conn = get_connection(&self.pool)?;
        let row = institutions::table
            .find(institution_id)
            .select(InstitutionDB::as_select())
            .first::<InstitutionDB>(&mut conn)
            .into_core()?;
        Institution::try_from(row)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        institutions::table
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn count_by_kind(&self, kind: InstitutionKind) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        institutions::table
            .filter(institutions::kind.eq(kind.as_str()))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn list_by_kind(
        &self,
        kind: InstitutionKind,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Institution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = institutions::table
            .filter(institutions::kind.eq(kind.as_str()))
            .order((institutions::created_at.asc(), institutions::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(InstitutionDB::as_select())
            .load::<InstitutionDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    async fn create(&self, new_institution: NewInstitution) -> Result<Institution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Institution> {
                let row = InstitutionDB {
                    id: Uuid::now_v7().to_string(),
                    name: new_institution.name,
                    description: new_institution.description,
                    kind: new_institution.kind.as_str().to_string(),
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(institutions::table)
                    .values(&row)
                    .returning(InstitutionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Institution::try_from(inserted)
            })
            .await
    }

    async fn update(&self, institution: Institution) -> Result<Institution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Institution> {
                let updated = diesel::update(institutions::table.find(&institution.id))
                    .set((
                        institutions::name.eq(institution.name),
                        institutions::description.eq(institution.description),
                        institutions::kind.eq(institution.kind.as_str()),
                    ))
                    .returning(InstitutionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Institution::try_from(updated)
            })
            .await
    }

    async fn delete(&self, institution_id: &str) -> Result<usize> {
        let institution_id = institution_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let referenced: i64 = donations::table
                    .filter(donations::institution_id.eq(&institution_id))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if referenced > 0 {
                    return Err(Error::ConstraintViolation(format!(
                        "Institution {institution_id} still has {referenced} donation(s)"
                    )));
                }
                Ok(diesel::delete(institutions::table.find(institution_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use tempfile::tempdir;

    fn setup() -> (InstitutionRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("institutions.db");
        let db_path = init(db_path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        (InstitutionRepository::new(pool, writer), dir)
    }

    fn new_institution(name: &str, kind: InstitutionKind) -> NewInstitution {
        NewInstitution {
            name: name.to_string(),
            description: None,
            kind,
        }
    }

    #[tokio::test]
    async fn test_list_by_kind_is_creation_ordered() {
        let (repo, _dir) = setup();
        for i in 1..=5 {
            repo.create(new_institution(&format!("F{i}"), InstitutionKind::Foundation))
                .await
                .unwrap();
        }
        repo.create(new_institution("N1", InstitutionKind::Ngo))
            .await
            .unwrap();

        assert_eq!(repo.count().unwrap(), 6);
        assert_eq!(repo.count_by_kind(InstitutionKind::Foundation).unwrap(), 5);
        assert_eq!(repo.count_by_kind(InstitutionKind::LocalCollection).unwrap(), 0);

        let first = repo.list_by_kind(InstitutionKind::Foundation, 0, 4).unwrap();
        let names: Vec<_> = first.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["F1", "F2", "F3", "F4"]);

        let second = repo.list_by_kind(InstitutionKind::Foundation, 4, 4).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "F5");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (repo, _dir) = setup();
        let mut created = repo
            .create(new_institution("Old", InstitutionKind::Ngo))
            .await
            .unwrap();
        created.name = "New".into();
        created.kind = InstitutionKind::LocalCollection;
        created.description = Some("Collects coats".into());

        let updated = repo.update(created.clone()).await.unwrap();
        assert_eq!(updated, created);
        assert_eq!(repo.get_by_id(&created.id).unwrap().name, "New");

        assert_eq!(repo.delete(&created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(&created.id).await.unwrap(), 0);
        assert!(repo.get_by_id(&created.id).unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (repo, _dir) = setup();
        let ghost = Institution {
            id: "missing".into(),
            name: "Ghost".into(),
            description: None,
            kind: InstitutionKind::Ngo,
        };
        assert!(repo.update(ghost).await.unwrap_err().is_not_found());
    }
}
