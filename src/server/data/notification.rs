//! Notification outbox repository.
//!
//! `enqueue` is called with the transaction of the change that caused the notification,
//! so a rolled-back booking never produces an email.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::notification::{NewNotification, Notification, NotificationStatus},
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Writes a PENDING notification to the outbox.
    pub async fn enqueue(&self, new: NewNotification) -> Result<Notification, AppError> {
        let entity = entity::notification::ActiveModel {
            kind: ActiveValue::Set(new.kind.as_str().to_string()),
            recipient: ActiveValue::Set(new.recipient),
            subject: ActiveValue::Set(new.subject),
            body: ActiveValue::Set(new.body),
            status: ActiveValue::Set(NotificationStatus::Pending.as_str().to_string()),
            attempts: ActiveValue::Set(0),
            last_error: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            sent_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Notification::from_entity(entity)
    }

    /// Oldest pending notifications, at most `limit`.
    pub async fn get_pending(&self, limit: u64) -> Result<Vec<Notification>, AppError> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::Status.eq(NotificationStatus::Pending.as_str()))
            .order_by_asc(entity::notification::Column::CreatedAt)
            .order_by_asc(entity::notification::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect()
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, AppError> {
        entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
            .map(Notification::from_entity)
            .transpose()
    }

    /// Notifications addressed to `recipient`, oldest first.
    pub async fn get_by_recipient(&self, recipient: &str) -> Result<Vec<Notification>, AppError> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::Recipient.eq(recipient))
            .order_by_asc(entity::notification::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect()
    }

    pub async fn mark_sent(&self, id: i32, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        let Some(existing) = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let attempts = existing.attempts;
        let mut active: entity::notification::ActiveModel = existing.into();
        active.status = ActiveValue::Set(NotificationStatus::Sent.as_str().to_string());
        active.attempts = ActiveValue::Set(attempts + 1);
        active.last_error = ActiveValue::Set(None);
        active.sent_at = ActiveValue::Set(Some(sent_at));
        active.update(self.db).await?;

        Ok(())
    }

    /// Records a failed delivery attempt.
    ///
    /// The notification stays PENDING for a retry until `max_attempts` is reached, then
    /// becomes FAILED.
    ///
    /// # Returns
    /// - `Ok(Some(NotificationStatus))` - Status after recording the attempt
    /// - `Ok(None)` - No notification with that id
    pub async fn record_failure(
        &self,
        id: i32,
        error: &str,
        max_attempts: i32,
    ) -> Result<Option<NotificationStatus>, AppError> {
        let Some(existing) = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let attempts = existing.attempts + 1;
        let status = if attempts >= max_attempts {
            NotificationStatus::Failed
        } else {
            NotificationStatus::Pending
        };

        let mut active: entity::notification::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.attempts = ActiveValue::Set(attempts);
        active.last_error = ActiveValue::Set(Some(error.to_string()));
        active.update(self.db).await?;

        Ok(Some(status))
    }
}
