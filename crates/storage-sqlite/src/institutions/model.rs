//! Database models for institutions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use charity_core::institutions::{Institution, InstitutionKind};
use charity_core::Error;

/// Database model for institutions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::institutions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstitutionDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<InstitutionDB> for Institution {
    type Error = Error;

    fn try_from(db: InstitutionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: db.kind.parse::<InstitutionKind>()?,
            id: db.id,
            name: db.name,
            description: db.description,
        })
    }
}
