//! Contact module - messages from visitors to the site administrators.

mod contact_model;
mod contact_service;
mod contact_traits;

pub use contact_model::{ContactForm, ContactReceipt, OutgoingMail};
pub use contact_service::ContactService;
pub use contact_traits::{ContactServiceTrait, MailTransport};
