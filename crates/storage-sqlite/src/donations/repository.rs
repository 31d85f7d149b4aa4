use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use charity_core::categories::Category;
use charity_core::donations::{Donation, DonationRepositoryTrait, NewDonation};
use charity_core::institutions::Institution;
use charity_core::Result;

use super::model::{DonationCategoryDB, DonationDB};
use crate::categories::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::institutions::InstitutionDB;
use crate::schema::{categories, donation_categories, donations, institutions};
use crate::utils::chunk_for_sqlite;

pub struct DonationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl DonationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        DonationRepository { pool, writer }
    }
}

/// Loads the category links of `rows` and assembles domain donations,
/// preserving the order of `rows`.
fn assemble(
    conn: &mut SqliteConnection,
    rows: Vec<(DonationDB, InstitutionDB)>,
) -> Result<Vec<Donation>> {
    let ids: Vec<String> = rows.iter().map(|(d, _)| d.id.clone()).collect();

    let mut by_donation: HashMap<String, Vec<Category>> = HashMap::new();
    for chunk in chunk_for_sqlite(&ids) {
        let links = donation_categories::table
            .inner_join(categories::table)
            .filter(donation_categories::donation_id.eq_any(chunk))
            .order(categories::name.asc())
            .select((donation_categories::donation_id, CategoryDB::as_select()))
            .load::<(String, CategoryDB)>(conn)
            .into_core()?;
        for (donation_id, category) in links {
            by_donation
                .entry(donation_id)
                .or_default()
                .push(Category::from(category));
        }
    }

    rows.into_iter()
        .map(|(donation, institution)| {
            let institution = Institution::try_from(institution)?;
            let cats = by_donation.remove(&donation.id).unwrap_or_default();
            Ok(donation.into_domain(institution, cats))
        })
        .collect()
}

fn load_one(conn: &mut SqliteConnection, donation_id: &str) -> Result<Donation> {
    let row = donations::table
        .inner_join(institutions::table)
        .filter(donations::id.eq(donation_id))
        .select((DonationDB::as_select(), InstitutionDB::as_select()))
        .first::<(DonationDB, InstitutionDB)>(conn)
        .map_err(StorageError::from)?;
    let mut assembled = assemble(conn, vec![row])?;
    assembled
        .pop()
        .ok_or_else(|| StorageError::QueryFailed(diesel::result::Error::NotFound).into())
}

#[async_trait]
impl DonationRepositoryTrait for DonationRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = donations::table
            .inner_join(institutions::table)
            .filter(donations::user_id.eq(user_id))
            .order((
                donations::is_taken.asc(),
                donations::pick_up_date.asc(),
                donations::pick_up_time.asc(),
                donations::created_at.asc(),
            ))
            .select((DonationDB::as_select(), InstitutionDB::as_select()))
            .load::<(DonationDB, InstitutionDB)>(&mut conn)
            .into_core()?;
        assemble(&mut conn, rows)
    }

    fn get_by_id(&self, donation_id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        load_one(&mut conn, donation_id)
    }

    fn total_quantity(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = donations::table
            .select(diesel::dsl::sum(donations::quantity))
            .first::<Option<i64>>(&mut conn)
            .into_core()?;
        Ok(total.unwrap_or(0))
    }

    async fn create(&self, new_donation: NewDonation) -> Result<Donation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Donation> {
                let donation_id = Uuid::now_v7().to_string();
                let row = DonationDB::new_row(
                    &new_donation,
                    donation_id.clone(),
                    Utc::now().naive_utc(),
                );
                diesel::insert_into(donations::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let links: Vec<DonationCategoryDB> = new_donation
                    .category_ids
                    .iter()
                    .map(|category_id| DonationCategoryDB {
                        donation_id: donation_id.clone(),
                        category_id: category_id.clone(),
                    })
                    .collect();
                for chunk in chunk_for_sqlite(&links) {
                    diesel::insert_into(donation_categories::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                load_one(conn, &donation_id)
            })
            .await
    }

    async fn mark_taken(&self, donation_id: &str, user_id: &str) -> Result<usize> {
        let donation_id = donation_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    donations::table
                        .filter(donations::id.eq(donation_id))
                        .filter(donations::user_id.eq(user_id)),
                )
                .set(donations::is_taken.eq(true))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryRepository;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use crate::institutions::InstitutionRepository;
    use crate::users::UserRepository;
    use charity_core::categories::{CategoryRepositoryTrait, NewCategory};
    use charity_core::errors::{DatabaseError, Error};
    use charity_core::institutions::{InstitutionKind, InstitutionRepositoryTrait, NewInstitution};
    use charity_core::users::{NewUser, User, UserRepositoryTrait};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    struct Fixture {
        donations: DonationRepository,
        institutions: InstitutionRepository,
        categories: CategoryRepository,
        users: UserRepository,
        _dir: tempfile::TempDir,
    }

    fn setup() -> Fixture {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("donations.db");
        let db_path = init(db_path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        Fixture {
            donations: DonationRepository::new(pool.clone(), writer.clone()),
            institutions: InstitutionRepository::new(pool.clone(), writer.clone()),
            categories: CategoryRepository::new(pool.clone(), writer.clone()),
            users: UserRepository::new(pool, writer),
            _dir: dir,
        }
    }

    async fn user(fx: &Fixture, email: &str) -> User {
        fx.users
            .create(NewUser {
                email: email.to_string(),
                first_name: "Jan".into(),
                last_name: "Kowalski".into(),
                password_hash: "hash".into(),
                is_superuser: false,
            })
            .await
            .unwrap()
    }

    async fn institution(fx: &Fixture) -> Institution {
        fx.institutions
            .create(NewInstitution {
                name: "Dbam o Zdrowie".into(),
                description: Some("Helps children".into()),
                kind: InstitutionKind::Foundation,
            })
            .await
            .unwrap()
    }

    fn new_donation(
        user_id: &str,
        institution_id: &str,
        category_ids: Vec<String>,
        day: u32,
        quantity: i32,
    ) -> NewDonation {
        NewDonation {
            quantity,
            institution_id: institution_id.to_string(),
            category_ids,
            address: "ul. Prosta 1".into(),
            phone_number: "600100200".into(),
            city: "Warszawa".into(),
            zip_code: "00-001".into(),
            pick_up_date: NaiveDate::from_ymd_opt(2030, 1, day).unwrap(),
            pick_up_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            pick_up_comment: None,
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_loads_institution_and_categories() {
        let fx = setup();
        let donor = user(&fx, "jan@example.org").await;
        let inst = institution(&fx).await;
        let toys = fx
            .categories
            .create(NewCategory { name: "Toys".into() })
            .await
            .unwrap();
        let books = fx
            .categories
            .create(NewCategory { name: "Books".into() })
            .await
            .unwrap();

        let created = fx
            .donations
            .create(new_donation(
                &donor.id,
                &inst.id,
                vec![toys.id.clone(), books.id.clone()],
                10,
                3,
            ))
            .await
            .unwrap();

        assert_eq!(created.institution, inst);
        assert_eq!(created.categories, vec![books, toys]);
        assert!(!created.is_taken);
        assert_eq!(fx.donations.get_by_id(&created.id).unwrap(), created);
    }

    #[tokio::test]
    async fn test_unknown_institution_rolls_back() {
        let fx = setup();
        let donor = user(&fx, "jan@example.org").await;
        let err = fx
            .donations
            .create(new_donation(&donor.id, "missing", vec![], 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
        assert_eq!(fx.donations.total_quantity().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_order_and_mark_taken() {
        let fx = setup();
        let donor = user(&fx, "jan@example.org").await;
        let other = user(&fx, "ola@example.org").await;
        let inst = institution(&fx).await;

        let late = fx
            .donations
            .create(new_donation(&donor.id, &inst.id, vec![], 20, 2))
            .await
            .unwrap();
        let early = fx
            .donations
            .create(new_donation(&donor.id, &inst.id, vec![], 5, 1))
            .await
            .unwrap();
        fx.donations
            .create(new_donation(&other.id, &inst.id, vec![], 1, 4))
            .await
            .unwrap();

        let ids: Vec<_> = fx
            .donations
            .list_for_user(&donor.id)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![early.id.clone(), late.id.clone()]);

        assert_eq!(fx.donations.mark_taken(&early.id, &other.id).await.unwrap(), 0);
        assert_eq!(fx.donations.mark_taken(&early.id, &donor.id).await.unwrap(), 1);

        let history = fx.donations.list_for_user(&donor.id).unwrap();
        assert_eq!(history[0].id, late.id);
        assert!(history[1].is_taken);
        assert_eq!(fx.donations.total_quantity().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_referenced_institution_cannot_be_deleted() {
        let fx = setup();
        let donor = user(&fx, "jan@example.org").await;
        let inst = institution(&fx).await;
        fx.donations
            .create(new_donation(&donor.id, &inst.id, vec![], 3, 1))
            .await
            .unwrap();

        let err = fx.institutions.delete(&inst.id).await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert_eq!(fx.institutions.get_by_id(&inst.id).unwrap(), inst);
    }

    #[tokio::test]
    async fn test_deleting_category_drops_links() {
        let fx = setup();
        let donor = user(&fx, "jan@example.org").await;
        let inst = institution(&fx).await;
        let toys = fx
            .categories
            .create(NewCategory { name: "Toys".into() })
            .await
            .unwrap();
        let donation = fx
            .donations
            .create(new_donation(&donor.id, &inst.id, vec![toys.id.clone()], 3, 1))
            .await
            .unwrap();

        fx.categories.delete(&toys.id).await.unwrap();
        assert!(fx
            .donations
            .get_by_id(&donation.id)
            .unwrap()
            .categories
            .is_empty());
    }
}
