//! Outbox notification models.

use chrono::{DateTime, Utc};

use crate::server::error::{internal::InternalError, AppError};

/// Why a notification was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ReservationConfirmation,
    PaymentConfirmation,
    ReservationCancellation,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReservationConfirmation => "RESERVATION_CONFIRMATION",
            Self::PaymentConfirmation => "PAYMENT_CONFIRMATION",
            Self::ReservationCancellation => "RESERVATION_CANCELLATION",
        }
    }

    fn from_stored(value: &str) -> Result<Self, AppError> {
        match value {
            "RESERVATION_CONFIRMATION" => Ok(Self::ReservationConfirmation),
            "PAYMENT_CONFIRMATION" => Ok(Self::PaymentConfirmation),
            "RESERVATION_CANCELLATION" => Ok(Self::ReservationCancellation),
            other => Err(InternalError::UnknownStatus {
                kind: "notification kind",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }

    fn from_stored(value: &str) -> Result<Self, AppError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "SENT" => Ok(Self::Sent),
            "FAILED" => Ok(Self::Failed),
            other => Err(InternalError::UnknownStatus {
                kind: "notification",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: NotificationStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            kind: NotificationKind::from_stored(&entity.kind)?,
            recipient: entity.recipient,
            subject: entity.subject,
            body: entity.body,
            status: NotificationStatus::from_stored(&entity.status)?,
            attempts: entity.attempts,
            last_error: entity.last_error,
            created_at: entity.created_at,
            sent_at: entity.sent_at,
        })
    }
}

/// A composed message waiting to be written to the outbox.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}
