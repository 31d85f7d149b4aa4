//! Categories module - kinds of donated goods.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{Category, NewCategory};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
