use log::info;
use std::sync::Arc;

use super::institutions_model::{Institution, InstitutionKind, NewInstitution};
use super::institutions_traits::{InstitutionRepositoryTrait, InstitutionServiceTrait};
use crate::constants::INSTITUTIONS_PER_PAGE;
use crate::errors::{DatabaseError, Result};
use crate::utils::{Page, PageWindow};

/// Service for managing institutions
pub struct InstitutionService {
    repository: Arc<dyn InstitutionRepositoryTrait>,
}

impl InstitutionService {
    pub fn new(repository: Arc<dyn InstitutionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InstitutionServiceTrait for InstitutionService {
    fn get_institutions(&self) -> Result<Vec<Institution>> {
        self.repository.list()
    }

    fn get_institution(&self, institution_id: &str) -> Result<Institution> {
        self.repository.get_by_id(institution_id)
    }

    fn count_institutions(&self) -> Result<i64> {
        self.repository.count()
    }

    fn page_by_kind(
        &self,
        kind: InstitutionKind,
        requested_page: Option<&str>,
    ) -> Result<Page<Institution>> {
        let count = self.repository.count_by_kind(kind)?;
        let window = PageWindow::resolve(requested_page, count, INSTITUTIONS_PER_PAGE);
        let items = self
            .repository
            .list_by_kind(kind, window.offset(), window.limit())?;
        Ok(window.into_page(items))
    }

    async fn create_institution(&self, new_institution: NewInstitution) -> Result<Institution> {
        let new_institution = new_institution.validated()?;
        let created = self.repository.create(new_institution).await?;
        info!("Created institution {} ({})", created.id, created.kind);
        Ok(created)
    }

    async fn update_institution(&self, institution: Institution) -> Result<Institution> {
        institution.validate()?;
        self.repository.update(institution).await
    }

    async fn delete_institution(&self, institution_id: &str) -> Result<usize> {
        let deleted = self.repository.delete(institution_id).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("Institution {institution_id}")).into());
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockInstitutionRepository {
        institutions: Vec<Institution>,
    }

    impl MockInstitutionRepository {
        fn of_kind(&self, kind: InstitutionKind) -> Vec<Institution> {
            self.institutions
                .iter()
                .filter(|i| i.kind == kind)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl InstitutionRepositoryTrait for MockInstitutionRepository {
        fn list(&self) -> Result<Vec<Institution>> {
            Ok(self.institutions.clone())
        }
        fn get_by_id(&self, _: &str) -> Result<Institution> {
            unimplemented!()
        }
        fn count(&self) -> Result<i64> {
            Ok(self.institutions.len() as i64)
        }
        fn count_by_kind(&self, kind: InstitutionKind) -> Result<i64> {
            Ok(self.of_kind(kind).len() as i64)
        }
        fn list_by_kind(
            &self,
            kind: InstitutionKind,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<Institution>> {
            Ok(self
                .of_kind(kind)
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }
        async fn create(&self, _: NewInstitution) -> Result<Institution> {
            unimplemented!()
        }
        async fn update(&self, _: Institution) -> Result<Institution> {
            unimplemented!()
        }
        async fn delete(&self, _: &str) -> Result<usize> {
            Ok(0)
        }
    }

    fn service() -> InstitutionService {
        let mut institutions = Vec::new();
        for n in 0..6 {
            institutions.push(Institution {
                id: format!("f{n}"),
                name: format!("Foundation {n}"),
                description: None,
                kind: InstitutionKind::Foundation,
            });
        }
        institutions.push(Institution {
            id: "n0".into(),
            name: "NGO 0".into(),
            description: None,
            kind: InstitutionKind::Ngo,
        });
        InstitutionService::new(Arc::new(MockInstitutionRepository { institutions }))
    }

    #[test]
    fn test_page_by_kind_slices_four_per_page() {
        let service = service();
        let first = service
            .page_by_kind(InstitutionKind::Foundation, None)
            .unwrap();
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.num_pages, 2);
        assert!(first.has_next);

        let second = service
            .page_by_kind(InstitutionKind::Foundation, Some("2"))
            .unwrap();
        assert_eq!(
            second.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["f4", "f5"]
        );
    }

    #[test]
    fn test_shared_page_number_clamps_per_kind() {
        let service = service();
        let ngos = service.page_by_kind(InstitutionKind::Ngo, Some("2")).unwrap();
        assert_eq!(ngos.number, 1);
        assert_eq!(ngos.items.len(), 1);

        let locals = service
            .page_by_kind(InstitutionKind::LocalCollection, Some("2"))
            .unwrap();
        assert!(locals.items.is_empty());
        assert_eq!(locals.num_pages, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_institution() {
        let err = service().delete_institution("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
