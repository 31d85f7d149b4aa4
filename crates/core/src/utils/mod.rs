//! Shared helpers: page resolution and form-field validators.

pub mod pagination;
pub mod validation;

pub use pagination::{Page, PageWindow};
