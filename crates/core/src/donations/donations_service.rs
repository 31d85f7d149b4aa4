use chrono::Local;
use log::{debug, info};
use std::sync::Arc;

use super::donations_model::{Donation, DonationForm};
use super::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::institutions::InstitutionRepositoryTrait;
use crate::users::User;

/// Service for pickup requests
pub struct DonationService {
    repository: Arc<dyn DonationRepositoryTrait>,
    institution_repository: Arc<dyn InstitutionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl DonationService {
    pub fn new(
        repository: Arc<dyn DonationRepositoryTrait>,
        institution_repository: Arc<dyn InstitutionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            institution_repository,
            category_repository,
        }
    }
}

#[async_trait::async_trait]
impl DonationServiceTrait for DonationService {
    async fn create_donation(&self, user: &User, form: DonationForm) -> Result<Donation> {
        let new_donation = form.into_new_donation(&user.id, Local::now().date_naive())?;

        match self
            .institution_repository
            .get_by_id(&new_donation.institution_id)
        {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(ValidationError::field("institutionId", "unknown institution").into())
            }
            Err(e) => return Err(e),
        }

        let known = self
            .category_repository
            .get_by_ids(&new_donation.category_ids)?;
        if known.len() != new_donation.category_ids.len() {
            return Err(ValidationError::field("categoryIds", "unknown category").into());
        }

        let donation = self.repository.create(new_donation).await?;
        info!(
            "User {} requested pickup {} of {} bag(s) for institution {}",
            user.id, donation.id, donation.quantity, donation.institution.id
        );
        Ok(donation)
    }

    fn get_user_donations(&self, user: &User) -> Result<Vec<Donation>> {
        self.repository.list_for_user(&user.id)
    }

    async fn mark_taken(&self, user: &User, donation_id: &str) -> Result<Vec<Donation>> {
        let matched = self.repository.mark_taken(donation_id, &user.id).await?;
        if matched == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Donation {donation_id}"
            ))));
        }
        debug!("Donation {} marked as taken by user {}", donation_id, user.id);
        self.repository.list_for_user(&user.id)
    }

    fn total_quantity(&self) -> Result<i64> {
        self.repository.total_quantity()
    }
}
