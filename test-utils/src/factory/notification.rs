//! Notification factory for seeding the outbox.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    kind: String,
    recipient: String,
    status: String,
    attempts: i32,
}

impl<'a> NotificationFactory<'a> {
    /// Defaults to a pending reservation confirmation with no attempts.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            kind: "RESERVATION_CONFIRMATION".to_string(),
            recipient: format!("recipient{}@example.com", id),
            status: "PENDING".to_string(),
            attempts: 0,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn attempts(mut self, attempts: i32) -> Self {
        self.attempts = attempts;
        self
    }

    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            kind: ActiveValue::Set(self.kind),
            recipient: ActiveValue::Set(self.recipient),
            subject: ActiveValue::Set("Test subject".to_string()),
            body: ActiveValue::Set("Test body".to_string()),
            status: ActiveValue::Set(self.status),
            attempts: ActiveValue::Set(self.attempts),
            last_error: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            sent_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_notification(
    db: &DatabaseConnection,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db).build().await
}
