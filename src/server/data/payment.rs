//! Payment data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::payment::{CreatePaymentParams, Payment},
};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreatePaymentParams) -> Result<Payment, AppError> {
        let entity = entity::payment::ActiveModel {
            reservation_id: ActiveValue::Set(params.reservation_id),
            amount_cents: ActiveValue::Set(params.amount_cents),
            method: ActiveValue::Set(params.method),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            transaction_id: ActiveValue::Set(params.transaction_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Payment::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, AppError> {
        entity::prelude::Payment::find_by_id(id)
            .one(self.db)
            .await?
            .map(Payment::from_entity)
            .transpose()
    }

    /// Payments recorded for a reservation, oldest first.
    pub async fn get_by_reservation(&self, reservation_id: i32) -> Result<Vec<Payment>, AppError> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::ReservationId.eq(reservation_id))
            .order_by_asc(entity::payment::Column::CreatedAt)
            .order_by_asc(entity::payment::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Payment::from_entity)
            .collect()
    }

    /// Most recent payment of a reservation, whatever its outcome.
    pub async fn latest_for_reservation(
        &self,
        reservation_id: i32,
    ) -> Result<Option<Payment>, AppError> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::ReservationId.eq(reservation_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .order_by_desc(entity::payment::Column::Id)
            .one(self.db)
            .await?
            .map(Payment::from_entity)
            .transpose()
    }

    /// Gets a page of all payments, newest first.
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Payment>, u64), AppError> {
        let paginator = entity::prelude::Payment::find()
            .order_by_desc(entity::payment::Column::CreatedAt)
            .order_by_desc(entity::payment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let payments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Payment::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((payments, total))
    }
}
