//! Outgoing mail transport.
//!
//! Notifications are composed into the outbox by the services and handed to a `Mailer`
//! by the dispatcher job. The default `LogMailer` writes every message to the log, which
//! is enough for development and keeps SMTP configuration out of the core.

use async_trait::async_trait;
use thiserror::Error;

/// A plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery failure reported by a `Mailer`.
#[derive(Error, Debug)]
pub enum MailError {
    /// The recipient address was refused.
    #[error("Recipient {0} rejected")]
    Rejected(String),

    /// The transport could not deliver the message, e.g. the relay was unreachable.
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Mailer that only logs messages.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            "Delivering mail"
        );
        tracing::debug!("{}", mail.body);

        Ok(())
    }
}
