//! SQLite storage implementation for institutions.

mod model;
mod repository;

pub use model::InstitutionDB;
pub use repository::InstitutionRepository;
