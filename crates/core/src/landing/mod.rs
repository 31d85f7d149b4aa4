//! Landing page data: donation totals and institutions grouped by kind.

mod landing_model;
mod landing_service;

pub use landing_model::LandingPage;
pub use landing_service::{LandingService, LandingServiceTrait};
