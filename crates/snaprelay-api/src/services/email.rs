//! Email transport for relaying uploads via SMTP.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use snaprelay_core::{AppError, Config, SmtpTls};

use super::compose::OutboundEmail;

/// Anything able to deliver a composed email.
///
/// Implementations must not retry: a failed delivery is reported to the caller as is.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError>;
}

/// SMTP transport authenticated with the service account.
///
/// lettre is built without its connection pool, so every send opens a fresh
/// connection to the relay and closes it once the message is accepted or refused.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create the SMTP transport from config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let host = config.smtp_host();
        let port = config.smtp_port();
        let tls = config.smtp_tls();

        let builder = match tls {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| AppError::Internal(format!("Invalid SMTP relay {}: {}", host, e)))?,
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| AppError::Internal(format!("Invalid SMTP relay {}: {}", host, e)))?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let builder = builder.port(port);
        let builder = if let Some(password) = config.smtp_password() {
            builder.credentials(Credentials::new(
                config.smtp_user().to_string(),
                password.to_string(),
            ))
        } else {
            tracing::warn!("EMAIL_PASS not set, relaying without SMTP authentication");
            builder
        };

        tracing::info!(
            host = %host,
            port = port,
            tls = %tls,
            "Email transport initialized (SMTP)"
        );

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError> {
        let message = email.to_message()?;
        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| AppError::Relay(e.to_string()))?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}
