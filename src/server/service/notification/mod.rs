//! Notification outbox service.
//!
//! Composes plain-text notifications (see `compose`) and dispatches pending outbox rows
//! through a `Mailer`. Rows are enqueued by the reservation and payment services inside
//! their own transactions; this service only drains the outbox.

pub mod compose;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    mail::{Mailer, OutgoingMail},
    model::notification::NotificationStatus,
};

/// Maximum notifications handed to the mailer per dispatch run.
pub const DISPATCH_BATCH_SIZE: u64 = 50;

/// Delivery attempts after which a notification is marked FAILED.
pub const MAX_DELIVERY_ATTEMPTS: i32 = 5;

/// Outcome of one dispatch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: u64,
    /// Failed this run but left PENDING for another attempt.
    pub retrying: u64,
    /// Reached the attempt limit and marked FAILED.
    pub failed: u64,
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn Mailer,
    from: &'a str,
}

impl<'a> NotificationService<'a> {
    /// Creates a new NotificationService.
    ///
    /// # Arguments
    /// - `db` - Database connection holding the outbox
    /// - `mailer` - Transport used for delivery
    /// - `from` - Sender address placed on every mail
    pub fn new(db: &'a DatabaseConnection, mailer: &'a dyn Mailer, from: &'a str) -> Self {
        Self { db, mailer, from }
    }

    /// Sends up to `DISPATCH_BATCH_SIZE` pending notifications, oldest first.
    ///
    /// A delivery failure never aborts the batch; it is recorded on the row and the
    /// notification is retried on a later run until `MAX_DELIVERY_ATTEMPTS` is reached.
    ///
    /// # Returns
    /// - `Ok(DispatchSummary)` - Counts of sent, retrying and failed notifications
    /// - `Err(AppError::DbErr)` - Outbox could not be read or updated
    pub async fn dispatch_pending(&self) -> Result<DispatchSummary, AppError> {
        let repo = NotificationRepository::new(self.db);
        let pending = repo.get_pending(DISPATCH_BATCH_SIZE).await?;

        let mut summary = DispatchSummary::default();
        for notification in pending {
            let mail = OutgoingMail {
                from: self.from.to_string(),
                to: notification.recipient.clone(),
                subject: notification.subject.clone(),
                body: notification.body.clone(),
            };

            match self.mailer.send(&mail).await {
                Ok(()) => {
                    repo.mark_sent(notification.id, Utc::now()).await?;
                    summary.sent += 1;
                }
                Err(e) => {
                    let status = repo
                        .record_failure(notification.id, &e.to_string(), MAX_DELIVERY_ATTEMPTS)
                        .await?;

                    if status == Some(NotificationStatus::Failed) {
                        tracing::error!(
                            notification_id = notification.id,
                            recipient = %notification.recipient,
                            "Giving up on notification: {}",
                            e
                        );
                        summary.failed += 1;
                    } else {
                        tracing::warn!(
                            notification_id = notification.id,
                            "Notification delivery failed, will retry: {}",
                            e
                        );
                        summary.retrying += 1;
                    }
                }
            }
        }

        if summary.sent + summary.retrying + summary.failed > 0 {
            tracing::info!(
                sent = summary.sent,
                retrying = summary.retrying,
                failed = summary.failed,
                "Notification dispatch finished"
            );
        }

        Ok(summary)
    }
}
