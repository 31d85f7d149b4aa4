//! Donation repository and service traits.

use async_trait::async_trait;

use super::donations_model::{Donation, DonationForm, NewDonation};
use crate::errors::Result;
use crate::users::User;

/// Trait defining the contract for Donation repository operations.
#[async_trait]
pub trait DonationRepositoryTrait: Send + Sync {
    /// A user's donations, not-taken first, then by pick-up date and time.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Donation>>;

    fn get_by_id(&self, donation_id: &str) -> Result<Donation>;

    /// Sum of the quantities of all donations.
    fn total_quantity(&self) -> Result<i64>;

    /// Inserts the donation together with its category links.
    async fn create(&self, new_donation: NewDonation) -> Result<Donation>;

    /// Sets `is_taken` on a donation owned by `user_id`.
    ///
    /// Returns the number of matched rows.
    async fn mark_taken(&self, donation_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for donation service operations.
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    async fn create_donation(&self, user: &User, form: DonationForm) -> Result<Donation>;
    fn get_user_donations(&self, user: &User) -> Result<Vec<Donation>>;
    /// Marks a donation of `user` as picked up and returns the refreshed history.
    async fn mark_taken(&self, user: &User, donation_id: &str) -> Result<Vec<Donation>>;
    fn total_quantity(&self) -> Result<i64>;
}
