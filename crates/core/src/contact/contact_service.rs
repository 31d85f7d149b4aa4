use log::{info, warn};
use std::sync::Arc;

use super::contact_model::{ContactForm, ContactReceipt};
use super::contact_traits::{ContactServiceTrait, MailTransport};
use crate::errors::Result;
use crate::users::{User, UserRepositoryTrait};

pub struct ContactService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    transport: Arc<dyn MailTransport>,
}

impl ContactService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            user_repository,
            transport,
        }
    }
}

#[async_trait::async_trait]
impl ContactServiceTrait for ContactService {
    async fn send_contact_message(
        &self,
        sender: Option<&User>,
        form: ContactForm,
    ) -> Result<ContactReceipt> {
        let recipients = self.user_repository.list_superuser_emails()?;
        let mail = form.compose(sender, recipients)?;

        if mail.to.is_empty() {
            warn!("Contact message dropped: no administrator accounts to deliver to");
            return Ok(ContactReceipt {
                delivered: false,
                recipient_count: 0,
            });
        }

        self.transport.send(&mail).await?;
        info!("Contact message delivered to {} administrator(s)", mail.to.len());
        Ok(ContactReceipt {
            delivered: true,
            recipient_count: mail.to.len(),
        })
    }
}
