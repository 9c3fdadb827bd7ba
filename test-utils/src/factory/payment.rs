//! Payment factory for creating test payment entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test payment records.
pub struct PaymentFactory<'a> {
    db: &'a DatabaseConnection,
    reservation_id: i32,
    amount_cents: i64,
    method: String,
    status: String,
    transaction_id: Option<String>,
}

impl<'a> PaymentFactory<'a> {
    /// Creates a new PaymentFactory with default values.
    ///
    /// Defaults:
    /// - amount_cents: `75_000`
    /// - method: `"CARD"`, status: `"SUCCESS"`
    /// - transaction_id: `"txn_{id}"`
    pub fn new(db: &'a DatabaseConnection, reservation_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            reservation_id,
            amount_cents: 75_000,
            method: "CARD".to_string(),
            status: "SUCCESS".to_string(),
            transaction_id: Some(format!("txn_{}", id)),
        }
    }

    pub fn amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::payment::Model, DbErr> {
        entity::payment::ActiveModel {
            reservation_id: ActiveValue::Set(self.reservation_id),
            amount_cents: ActiveValue::Set(self.amount_cents),
            method: ActiveValue::Set(self.method),
            status: ActiveValue::Set(self.status),
            transaction_id: ActiveValue::Set(self.transaction_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a successful card payment for the given reservation.
pub async fn create_payment(
    db: &DatabaseConnection,
    reservation_id: i32,
) -> Result<entity::payment::Model, DbErr> {
    PaymentFactory::new(db, reservation_id).build().await
}
