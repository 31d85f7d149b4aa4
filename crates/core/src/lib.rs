//! Charity Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the donation app: users and
//! their credentials, institutions, categories, pickup requests, the landing
//! page summary and the contact form. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod categories;
pub mod constants;
pub mod contact;
pub mod donations;
pub mod errors;
pub mod institutions;
pub mod landing;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
