//! Reservation data repository.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::car::active_overlap_condition,
    error::{reservation::ReservationError, AppError},
    model::{
        availability::{DateRange, PaymentStatus, ReservationStatus},
        reservation::{NewReservation, Reservation},
        stats::ReservationStats,
    },
};

pub struct ReservationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReservationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a reservation as PENDING with payment status PENDING.
    pub async fn create(&self, new: NewReservation) -> Result<Reservation, AppError> {
        let now = Utc::now();
        let guest = new.guest;
        let entity = entity::reservation::ActiveModel {
            car_id: ActiveValue::Set(new.car_id),
            user_id: ActiveValue::Set(new.user_id),
            start_date: ActiveValue::Set(new.range.start()),
            end_date: ActiveValue::Set(new.range.end()),
            total_price_cents: ActiveValue::Set(new.total_price_cents),
            status: ActiveValue::Set(ReservationStatus::Pending.as_str().to_string()),
            payment_status: ActiveValue::Set(PaymentStatus::Pending.as_str().to_string()),
            guest_first_name: ActiveValue::Set(guest.as_ref().map(|g| g.first_name.clone())),
            guest_last_name: ActiveValue::Set(guest.as_ref().map(|g| g.last_name.clone())),
            guest_email: ActiveValue::Set(guest.as_ref().map(|g| g.email.clone())),
            guest_phone: ActiveValue::Set(guest.and_then(|g| g.phone)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Reservation::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, AppError> {
        entity::prelude::Reservation::find_by_id(id)
            .one(self.db)
            .await?
            .map(Reservation::from_entity)
            .transpose()
    }

    /// Active reservations of a car whose range overlaps `range`.
    pub async fn find_overlapping(
        &self,
        car_id: i32,
        range: &DateRange,
    ) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::CarId.eq(car_id))
            .filter(active_overlap_condition(range))
            .order_by_asc(entity::reservation::Column::StartDate)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    pub async fn has_active_for_car(&self, car_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::CarId.eq(car_id))
            .filter(
                entity::reservation::Column::Status
                    .is_in(ReservationStatus::active().map(|s| s.as_str())),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Reservations of a user in any of `statuses`, newest first.
    pub async fn get_by_user(
        &self,
        user_id: i32,
        statuses: &[ReservationStatus],
    ) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::UserId.eq(user_id))
            .filter(entity::reservation::Column::Status.is_in(statuses.iter().map(|s| s.as_str())))
            .order_by_desc(entity::reservation::Column::CreatedAt)
            .order_by_desc(entity::reservation::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    /// Gets a page of reservations, newest first, optionally filtered by status.
    ///
    /// # Returns
    /// - `Ok((reservations, total))` - Requested zero-indexed page and total matches
    pub async fn get_paginated(
        &self,
        status: Option<ReservationStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Reservation>, u64), AppError> {
        let mut query = entity::prelude::Reservation::find();
        if let Some(status) = status {
            query = query.filter(entity::reservation::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::reservation::Column::CreatedAt)
            .order_by_desc(entity::reservation::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let reservations = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((reservations, total))
    }

    /// Moves a reservation from its current statuses to `status` and `payment_status`.
    ///
    /// The UPDATE only matches while the row still holds the status and payment status
    /// of `current`. A competing transition that committed first leaves no row to
    /// update, and this call fails instead of overwriting it. Transition rules are
    /// checked by the service layer.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Updated reservation
    /// - `Err(AppError::NotFound)` - No reservation with that id
    /// - `Err(ReservationError::InvalidTransition)` - The row changed since `current` was read
    pub async fn update_status(
        &self,
        current: &Reservation,
        status: ReservationStatus,
        payment_status: PaymentStatus,
    ) -> Result<Reservation, AppError> {
        let result = entity::prelude::Reservation::update_many()
            .col_expr(
                entity::reservation::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                entity::reservation::Column::PaymentStatus,
                Expr::value(payment_status.as_str()),
            )
            .col_expr(entity::reservation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::reservation::Column::Id.eq(current.id))
            .filter(entity::reservation::Column::Status.eq(current.status.as_str()))
            .filter(
                entity::reservation::Column::PaymentStatus.eq(current.payment_status.as_str()),
            )
            .exec(self.db)
            .await?;

        let found = self.find_by_id(current.id).await?;
        match found {
            None => Err(AppError::NotFound("Reservation not found".to_string())),
            Some(actual) if result.rows_affected == 0 => {
                tracing::warn!(
                    reservation_id = current.id,
                    expected = %current.status,
                    actual = %actual.status,
                    "Reservation changed concurrently, status update skipped"
                );
                Err(ReservationError::InvalidTransition {
                    id: current.id,
                    from: actual.status,
                    to: status,
                }
                .into())
            }
            Some(updated) => Ok(updated),
        }
    }

    /// PENDING reservations created before `cutoff`.
    pub async fn find_pending_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::Status.eq(ReservationStatus::Pending.as_str()))
            .filter(entity::reservation::Column::CreatedAt.lt(cutoff))
            .order_by_asc(entity::reservation::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    /// CONFIRMED reservations whose range contains `date`.
    pub async fn find_confirmed_covering(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::Reservation::find()
            .filter(
                entity::reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()),
            )
            .filter(entity::reservation::Column::StartDate.lte(date))
            .filter(entity::reservation::Column::EndDate.gte(date))
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    /// CONFIRMED reservations that ended before `date`.
    pub async fn find_confirmed_ended_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::Reservation::find()
            .filter(
                entity::reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()),
            )
            .filter(entity::reservation::Column::EndDate.lt(date))
            .order_by_asc(entity::reservation::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    /// Counts reservations per status with a single grouped query.
    pub async fn count_by_status(&self) -> Result<ReservationStats, AppError> {
        let rows = entity::prelude::Reservation::find()
            .select_only()
            .column(entity::reservation::Column::Status)
            .column_as(entity::reservation::Column::Id.count(), "count")
            .group_by(entity::reservation::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.db)
            .await?;

        let mut stats = ReservationStats::default();
        for (status, count) in rows {
            stats.add(ReservationStatus::from_stored(&status)?, count as u64);
        }

        Ok(stats)
    }

    /// Sum of totals of reservations with payment status PAID.
    pub async fn sum_paid_totals(&self) -> Result<i64, AppError> {
        let totals = entity::prelude::Reservation::find()
            .select_only()
            .column(entity::reservation::Column::TotalPriceCents)
            .filter(entity::reservation::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            .into_tuple::<i64>()
            .all(self.db)
            .await?;

        Ok(totals.into_iter().sum())
    }
}
