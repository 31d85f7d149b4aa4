use std::sync::Arc;

use super::landing_model::LandingPage;
use crate::donations::DonationServiceTrait;
use crate::errors::Result;
use crate::institutions::{InstitutionKind, InstitutionServiceTrait};

pub trait LandingServiceTrait: Send + Sync {
    /// Builds the landing page; the one `requested_page` drives all three groups.
    fn get_landing_page(&self, requested_page: Option<&str>) -> Result<LandingPage>;
}

pub struct LandingService {
    donation_service: Arc<dyn DonationServiceTrait>,
    institution_service: Arc<dyn InstitutionServiceTrait>,
}

impl LandingService {
    pub fn new(
        donation_service: Arc<dyn DonationServiceTrait>,
        institution_service: Arc<dyn InstitutionServiceTrait>,
    ) -> Self {
        Self {
            donation_service,
            institution_service,
        }
    }
}

impl LandingServiceTrait for LandingService {
    fn get_landing_page(&self, requested_page: Option<&str>) -> Result<LandingPage> {
        let institutions = &self.institution_service;
        Ok(LandingPage {
            donation_quantity: self.donation_service.total_quantity()?,
            institution_count: institutions.count_institutions()?,
            foundations: institutions.page_by_kind(InstitutionKind::Foundation, requested_page)?,
            organizations: institutions.page_by_kind(InstitutionKind::Ngo, requested_page)?,
            local_collections: institutions
                .page_by_kind(InstitutionKind::LocalCollection, requested_page)?,
        })
    }
}
