//! Payment recording and the payment-success transition.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        car::CarRepository, notification::NotificationRepository,
        payment::PaymentRepository, reservation::ReservationRepository,
    },
    error::{internal::InternalError, reservation::ReservationError, AppError},
    model::{
        availability::{CarStatus, PaymentOutcome, PaymentStatus, ReservationStatus},
        payment::{CreatePaymentParams, PaginatedPayments, Payment},
        user::User,
    },
    service::{
        notification::compose,
        reservation::{ensure_visible, load_recipient, reservation_not_found},
    },
    util::pagination::total_pages,
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment attempt for a reservation.
    ///
    /// A `SUCCESS` payment confirms the reservation in the same transaction: the
    /// reservation becomes CONFIRMED/PAID, the car becomes RENTED when the rental period
    /// has already started, and a payment-confirmation notification is enqueued.
    /// `FAILED` and `PENDING` outcomes are only recorded.
    ///
    /// # Access Control
    /// - Anonymous callers may pay (guest checkout)
    /// - Authenticated callers must own the reservation or be admin; others get 404
    ///
    /// # Returns
    /// - `Ok(Payment)` - The stored payment
    /// - `Err(AppError::NotFound)` - Reservation missing or not visible
    /// - `Err(ReservationError::InvalidTransition)` - SUCCESS for a non-PENDING reservation
    /// - `Err(AppError::BadRequest)` - SUCCESS amount differs from the reservation total
    pub async fn create(
        &self,
        params: CreatePaymentParams,
        caller: Option<&User>,
    ) -> Result<Payment, AppError> {
        let txn = self.db.begin().await?;

        let reservation_repo = ReservationRepository::new(&txn);
        let reservation = reservation_repo
            .find_by_id(params.reservation_id)
            .await?
            .ok_or_else(reservation_not_found)?;
        if let Some(caller) = caller {
            ensure_visible(&reservation, caller)?;
        }

        if params.status == PaymentOutcome::Success {
            if reservation.status != ReservationStatus::Pending {
                tracing::warn!(
                    reservation_id = reservation.id,
                    status = %reservation.status,
                    "Rejected payment for reservation that is not pending"
                );
                return Err(ReservationError::InvalidTransition {
                    id: reservation.id,
                    from: reservation.status,
                    to: ReservationStatus::Confirmed,
                }
                .into());
            }

            if params.amount_cents != reservation.total_price_cents {
                return Err(AppError::BadRequest(format!(
                    "Payment amount must equal the reservation total of {} cents",
                    reservation.total_price_cents
                )));
            }
        }

        let payment = PaymentRepository::new(&txn).create(params).await?;

        if payment.status == PaymentOutcome::Success {
            let confirmed = reservation_repo
                .update_status(
                    &reservation,
                    ReservationStatus::Confirmed,
                    PaymentStatus::Paid,
                )
                .await?;

            let car_repo = CarRepository::new(&txn);
            car_repo.claim(confirmed.car_id).await?;
            let car = car_repo
                .find_by_id(confirmed.car_id)
                .await?
                .ok_or_else(|| InternalError::MissingRelation {
                    entity: "car",
                    id: confirmed.car_id,
                    from: format!("reservation {}", confirmed.id),
                })?;

            let today = Utc::now().date_naive();
            if confirmed.range.contains(today) && car.status == CarStatus::Available {
                car_repo.set_status(car.id, CarStatus::Rented).await?;
            }

            let recipient = load_recipient(&txn, &confirmed).await?;
            NotificationRepository::new(&txn)
                .enqueue(compose::payment_confirmation(
                    &recipient,
                    &confirmed,
                    &car,
                    payment.amount_cents,
                    &payment.method,
                ))
                .await?;

            tracing::info!(
                reservation_id = confirmed.id,
                payment_id = payment.id,
                amount_cents = payment.amount_cents,
                "Reservation confirmed by payment"
            );
        } else {
            tracing::info!(
                reservation_id = reservation.id,
                payment_id = payment.id,
                outcome = %payment.status,
                "Payment recorded"
            );
        }

        txn.commit().await?;

        Ok(payment)
    }

    /// Gets a payment whose reservation the caller may see.
    pub async fn get_visible(&self, id: i32, caller: &User) -> Result<Payment, AppError> {
        let not_found = || AppError::NotFound("Payment not found".to_string());

        let payment = PaymentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;
        let reservation = ReservationRepository::new(self.db)
            .find_by_id(payment.reservation_id)
            .await?
            .ok_or_else(not_found)?;

        ensure_visible(&reservation, caller).map_err(|_| not_found())?;

        Ok(payment)
    }

    /// Payments of a reservation the caller may see, oldest first.
    pub async fn by_reservation(
        &self,
        reservation_id: i32,
        caller: &User,
    ) -> Result<Vec<Payment>, AppError> {
        let reservation = ReservationRepository::new(self.db)
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(reservation_not_found)?;
        ensure_visible(&reservation, caller)?;

        PaymentRepository::new(self.db)
            .get_by_reservation(reservation_id)
            .await
    }

    pub async fn list(&self, page: u64, per_page: u64) -> Result<PaginatedPayments, AppError> {
        let (payments, total) = PaymentRepository::new(self.db)
            .get_paginated(page, per_page)
            .await?;

        Ok(PaginatedPayments {
            payments,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }
}
