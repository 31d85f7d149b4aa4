//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use charity_core::users::{NewUser, User};

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub session_version: i32,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl UserDB {
    /// Row for a new user with a fresh time-ordered id.
    pub fn new_row(new_user: NewUser, now: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_superuser: new_user.is_superuser,
            is_active: true,
            session_version: 0,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            password_hash: db.password_hash,
            is_superuser: db.is_superuser,
            is_active: db.is_active,
            session_version: db.session_version,
            last_login: db.last_login,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
