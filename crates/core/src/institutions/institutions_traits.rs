//! Institution repository and service traits.

use async_trait::async_trait;

use super::institutions_model::{Institution, InstitutionKind, NewInstitution};
use crate::errors::Result;
use crate::utils::Page;

/// Trait defining the contract for Institution repository operations.
#[async_trait]
pub trait InstitutionRepositoryTrait: Send + Sync {
    /// All institutions in creation order.
    fn list(&self) -> Result<Vec<Institution>>;
    fn get_by_id(&self, institution_id: &str) -> Result<Institution>;
    fn count(&self) -> Result<i64>;
    fn count_by_kind(&self, kind: InstitutionKind) -> Result<i64>;
    /// A creation-ordered slice of the institutions of one kind.
    fn list_by_kind(
        &self,
        kind: InstitutionKind,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Institution>>;
    async fn create(&self, new_institution: NewInstitution) -> Result<Institution>;
    async fn update(&self, institution: Institution) -> Result<Institution>;
    async fn delete(&self, institution_id: &str) -> Result<usize>;
}

/// Trait for institution service operations.
#[async_trait]
pub trait InstitutionServiceTrait: Send + Sync {
    fn get_institutions(&self) -> Result<Vec<Institution>>;
    fn get_institution(&self, institution_id: &str) -> Result<Institution>;
    fn count_institutions(&self) -> Result<i64>;
    /// One page of the given kind; `requested_page` is resolved leniently.
    fn page_by_kind(
        &self,
        kind: InstitutionKind,
        requested_page: Option<&str>,
    ) -> Result<Page<Institution>>;
    async fn create_institution(&self, new_institution: NewInstitution) -> Result<Institution>;
    async fn update_institution(&self, institution: Institution) -> Result<Institution>;
    async fn delete_institution(&self, institution_id: &str) -> Result<usize>;
}
