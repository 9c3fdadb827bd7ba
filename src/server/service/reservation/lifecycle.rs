//! Cancel and complete transitions.
//!
//! Every transition runs in a transaction that also adjusts the car status and writes
//! the outbox row, so a failure leaves reservation, car and notification untouched.

use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};

use super::{ensure_visible, load_recipient, reservation_not_found, ReservationService};
use crate::server::{
    data::{
        car::CarRepository, notification::NotificationRepository,
        reservation::ReservationRepository,
    },
    error::{auth::AuthError, reservation::ReservationError, AppError},
    model::{
        availability::{CarStatus, PaymentStatus, ReservationStatus},
        reservation::{Reservation, ReservationUpdate},
        user::User,
    },
    service::notification::compose,
};

impl<'a> ReservationService<'a> {
    /// Applies a PATCH status update on behalf of `caller`.
    pub async fn update(
        &self,
        id: i32,
        caller: &User,
        update: ReservationUpdate,
    ) -> Result<Reservation, AppError> {
        match update {
            ReservationUpdate::Cancel => self.cancel(id, caller).await,
            ReservationUpdate::Complete => self.complete(id, caller).await,
        }
    }

    /// Cancels a PENDING or CONFIRMED reservation.
    ///
    /// # Access Control
    /// - Owner of the reservation or an admin; others get 404
    ///
    /// # Returns
    /// - `Ok(Reservation)` - CANCELLED reservation, payment status REFUNDED if it was PAID
    /// - `Err(AppError::NotFound)` - Reservation missing or not visible to the caller
    /// - `Err(ReservationError::InvalidTransition)` - Already cancelled or completed
    pub async fn cancel(&self, id: i32, caller: &User) -> Result<Reservation, AppError> {
        let txn = self.db.begin().await?;

        let reservation = ReservationRepository::new(&txn)
            .find_by_id(id)
            .await?
            .ok_or_else(reservation_not_found)?;
        ensure_visible(&reservation, caller)?;

        let cancelled = cancel_in(&txn, reservation, Utc::now().date_naive()).await?;

        txn.commit().await?;

        tracing::info!(
            reservation_id = cancelled.id,
            cancelled_by = caller.id,
            payment_status = %cancelled.payment_status,
            "Reservation cancelled"
        );

        Ok(cancelled)
    }

    /// Marks a CONFIRMED reservation as COMPLETED and releases the car.
    ///
    /// # Access Control
    /// - Admin only
    pub async fn complete(&self, id: i32, caller: &User) -> Result<Reservation, AppError> {
        if !caller.is_admin() {
            return Err(AuthError::AccessDenied(
                caller.id,
                format!("non-admin tried to complete reservation {}", id),
            )
            .into());
        }

        let txn = self.db.begin().await?;

        let reservation = ReservationRepository::new(&txn)
            .find_by_id(id)
            .await?
            .ok_or_else(reservation_not_found)?;

        let completed = complete_in(&txn, reservation, Utc::now().date_naive()).await?;

        txn.commit().await?;

        tracing::info!(reservation_id = completed.id, "Reservation completed");

        Ok(completed)
    }
}

pub(super) fn ensure_transition(
    reservation: &Reservation,
    next: ReservationStatus,
) -> Result<(), AppError> {
    if !reservation.status.can_transition_to(next) {
        tracing::warn!(
            reservation_id = reservation.id,
            from = %reservation.status,
            to = %next,
            "Rejected reservation status change"
        );
        return Err(ReservationError::InvalidTransition {
            id: reservation.id,
            from: reservation.status,
            to: next,
        }
        .into());
    }

    Ok(())
}

/// Cancels inside an open transaction and enqueues the cancellation notification.
pub(super) async fn cancel_in<C: ConnectionTrait>(
    db: &C,
    reservation: Reservation,
    today: NaiveDate,
) -> Result<Reservation, AppError> {
    ensure_transition(&reservation, ReservationStatus::Cancelled)?;

    let refunded = reservation.payment_status == PaymentStatus::Paid;
    let payment_status = if refunded {
        PaymentStatus::Refunded
    } else {
        reservation.payment_status
    };

    let cancelled = ReservationRepository::new(db)
        .update_status(&reservation, ReservationStatus::Cancelled, payment_status)
        .await?;

    release_car(db, cancelled.car_id, today).await?;

    let car = CarRepository::new(db).find_by_id(cancelled.car_id).await?;
    let recipient = load_recipient(db, &cancelled).await?;
    NotificationRepository::new(db)
        .enqueue(compose::reservation_cancellation(
            &recipient,
            &cancelled,
            car.as_ref(),
            refunded,
        ))
        .await?;

    Ok(cancelled)
}

/// Completes inside an open transaction.
pub(super) async fn complete_in<C: ConnectionTrait>(
    db: &C,
    reservation: Reservation,
    today: NaiveDate,
) -> Result<Reservation, AppError> {
    ensure_transition(&reservation, ReservationStatus::Completed)?;

    let completed = ReservationRepository::new(db)
        .update_status(
            &reservation,
            ReservationStatus::Completed,
            reservation.payment_status,
        )
        .await?;

    release_car(db, completed.car_id, today).await?;

    Ok(completed)
}

/// Returns a RENTED car to AVAILABLE unless another confirmed rental covers `today`.
///
/// Claims the car row first, so a concurrent rental start for the same car is either
/// visible here or waits for this transaction.
async fn release_car<C: ConnectionTrait>(
    db: &C,
    car_id: i32,
    today: NaiveDate,
) -> Result<(), AppError> {
    let car_repo = CarRepository::new(db);
    if !car_repo.claim(car_id).await? {
        return Ok(());
    }
    let Some(car) = car_repo.find_by_id(car_id).await? else {
        return Ok(());
    };
    if car.status != CarStatus::Rented {
        return Ok(());
    }

    let still_rented = ReservationRepository::new(db)
        .find_confirmed_covering(today)
        .await?
        .iter()
        .any(|r| r.car_id == car_id);

    if !still_rented {
        car_repo.set_status(car_id, CarStatus::Available).await?;
        tracing::debug!(car_id, "Car returned to AVAILABLE");
    }

    Ok(())
}
