use async_trait::async_trait;

use super::contact_model::{ContactForm, ContactReceipt, OutgoingMail};
use crate::errors::Result;
use crate::users::User;

/// Delivers composed mails.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Trait for contact service operations.
#[async_trait]
pub trait ContactServiceTrait: Send + Sync {
    /// Forwards a contact message to every administrator.
    async fn send_contact_message(
        &self,
        sender: Option<&User>,
        form: ContactForm,
    ) -> Result<ContactReceipt>;
}
