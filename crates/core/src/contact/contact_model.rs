use serde::{Deserialize, Serialize};

use crate::constants::{CONTACT_SUBJECT_PREFIX, MAX_NAME_LENGTH};
use crate::errors::{Result, ValidationError};
use crate::users::User;
use crate::utils::validation::required_text;

/// Message submitted through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub message: String,
}

/// A mail ready to be handed to a transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Address replies should go to, when the sender is known.
    pub reply_to: Option<String>,
}

/// What happened to a contact message.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub delivered: bool,
    pub recipient_count: usize,
}

impl ContactForm {
    /// Builds the mail for `recipients`.
    ///
    /// A logged-in sender is identified by their account email; anonymous
    /// senders must give a name and surname, which are appended instead.
    pub fn compose(&self, sender: Option<&User>, recipients: Vec<String>) -> Result<OutgoingMail> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::MissingField("message".to_string()).into());
        }

        let (name, surname) = match sender {
            Some(_) => (
                self.name.trim().to_string(),
                self.surname.trim().to_string(),
            ),
            None => (
                required_text("name", &self.name, MAX_NAME_LENGTH)?,
                required_text("surname", &self.surname, MAX_NAME_LENGTH)?,
            ),
        };

        let signature = match sender {
            Some(user) => format!(" -->> from user {}", user.email),
            None => format!(" -->> from {name} {surname}"),
        };

        Ok(OutgoingMail {
            to: recipients,
            subject: format!("{CONTACT_SUBJECT_PREFIX} {name} {surname}")
                .trim_end()
                .to_string(),
            body: format!("{message}{signature}"),
            reply_to: sender.map(|u| u.email.clone()),
        })
    }
}
