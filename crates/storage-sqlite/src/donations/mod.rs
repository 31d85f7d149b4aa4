//! SQLite storage implementation for donations and their category links.

mod model;
mod repository;

pub use model::{DonationCategoryDB, DonationDB};
pub use repository::DonationRepository;
