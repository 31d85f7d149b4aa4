//! Donations module - pickup requests made by users for an institution.

mod donations_model;
mod donations_service;
mod donations_traits;


pub use donations_model::{Donation, DonationForm, NewDonation};
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
