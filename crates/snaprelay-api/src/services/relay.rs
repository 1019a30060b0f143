//! Upload relay service: turns a validated submission into exactly one outbound email.

use std::sync::Arc;

use snaprelay_core::{AppError, Config, Submission};

use super::compose::{EnvelopeSettings, OutboundEmail};
use super::email::MailTransport;

#[derive(Clone)]
pub struct UploadRelayService {
    transport: Arc<dyn MailTransport>,
    envelope: EnvelopeSettings,
}

impl UploadRelayService {
    pub fn new(transport: Arc<dyn MailTransport>, envelope: EnvelopeSettings) -> Self {
        Self {
            transport,
            envelope,
        }
    }

    pub fn from_config(transport: Arc<dyn MailTransport>, config: &Config) -> Self {
        Self::new(
            transport,
            EnvelopeSettings {
                service_address: config.smtp_user().to_string(),
                recipient: config.recipient().to_string(),
                subject: config.subject().to_string(),
            },
        )
    }

    /// Compose and send the email for `submission`.
    ///
    /// A single delivery attempt is made; its failure is returned unchanged.
    pub async fn relay(&self, submission: &Submission) -> Result<(), AppError> {
        let email = OutboundEmail::compose(submission, &self.envelope);

        tracing::info!(
            recipient = %email.to,
            filename = %email.attachment.filename,
            size = email.attachment.data.len(),
            "Sending email"
        );

        match self.transport.send(&email).await {
            Ok(()) => {
                tracing::info!(recipient = %email.to, "Email sent successfully");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, recipient = %email.to, "Error sending email");
                Err(e)
            }
        }
    }
}
