//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
