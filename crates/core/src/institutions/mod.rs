//! Institutions module - charity recipients grouped by kind for display.

mod institutions_model;
mod institutions_service;
mod institutions_traits;

pub use institutions_model::{Institution, InstitutionKind, NewInstitution};
pub use institutions_service::InstitutionService;
pub use institutions_traits::{InstitutionRepositoryTrait, InstitutionServiceTrait};
