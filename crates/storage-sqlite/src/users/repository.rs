use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use charity_core::users::{NewUser, ProfileUpdate, User, UserRepositoryTrait};
use charity_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    let row = users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .map_err(StorageError::from)?;
    Ok(User::from(row))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn list_superuser_emails(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::is_superuser.eq(true))
            .filter(users::is_active.eq(true))
            .order(users::created_at.asc())
            .select(users::email)
            .load::<String>(&mut conn)
            .into_core()
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = UserDB::new_row(new_user, Utc::now().naive_utc());
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(inserted))
            })
            .await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::first_name.eq(update.first_name),
                        users::last_name.eq(update.last_name),
                        users::email.eq(update.email),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn set_password(&self, user_id: &str, password_hash: String) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::password_hash.eq(password_hash),
                        users::session_version.eq(users::session_version + 1),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_user(conn, &user_id)
            })
            .await
    }

    async fn record_login(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(users::table.find(user_id))
                    .set(users::last_login.eq(Some(Utc::now().naive_utc())))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn promote_to_superuser(
        &self,
        user_id: &str,
        password_hash: Option<String>,
    ) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::is_superuser.eq(true),
                        users::is_active.eq(true),
                        users::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if let Some(hash) = password_hash {
                    diesel::update(users::table.find(&user_id))
                        .set((
                            users::password_hash.eq(hash),
                            users::session_version.eq(users::session_version + 1),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                load_user(conn, &user_id)
            })
            .await
    }
}
