//! Mail transports used by the contact form.

use std::time::Duration;

use async_trait::async_trait;
use charity_core::contact::{MailTransport, OutgoingMail};
use charity_core::{Error, Result};
use serde::Serialize;

/// Writes mails to the log instead of delivering them.
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tracing::info!(
            to = ?mail.to,
            subject = %mail.subject,
            "Mail not delivered (no relay configured): {}",
            mail.body
        );
        Ok(())
    }
}

/// Posts mails as JSON to an HTTP relay.
pub struct HttpRelayMailTransport {
    client: reqwest::Client,
    url: String,
    from: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayPayload<'a> {
    from: &'a str,
    #[serde(flatten)]
    mail: &'a OutgoingMail,
}

impl HttpRelayMailTransport {
    pub fn new(url: impl Into<String>, from: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl MailTransport for HttpRelayMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let payload = RelayPayload {
            from: &self.from,
            mail,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Mail(format!("relay unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Mail(format!("relay answered {status}")));
        }
        tracing::debug!("Relayed mail to {} recipient(s)", mail.to.len());
        Ok(())
    }
}
