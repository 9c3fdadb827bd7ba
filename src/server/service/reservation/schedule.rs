//! Time-driven reservation transitions.
//!
//! Each method processes its candidates one transaction at a time. Status writes are
//! compare-and-set, so a candidate that a payment or cancellation moved after the scan
//! is skipped rather than overwritten.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::TransactionTrait;

use super::{
    lifecycle::{cancel_in, complete_in},
    ReservationService,
};
use crate::server::{
    data::{car::CarRepository, reservation::ReservationRepository},
    error::{reservation::ReservationError, AppError},
    model::availability::{CarStatus, ReservationStatus},
};

impl<'a> ReservationService<'a> {
    /// Cancels PENDING reservations created more than `hold` before `now`.
    ///
    /// A non-positive `hold` disables expiry.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of reservations cancelled
    pub async fn expire_pending(
        &self,
        now: DateTime<Utc>,
        hold: Duration,
    ) -> Result<u64, AppError> {
        if hold <= Duration::zero() {
            return Ok(0);
        }

        let stale = ReservationRepository::new(self.db)
            .find_pending_created_before(now - hold)
            .await?;

        let mut expired = 0;
        for candidate in stale {
            let txn = self.db.begin().await?;

            let Some(current) = ReservationRepository::new(&txn)
                .find_by_id(candidate.id)
                .await?
            else {
                continue;
            };
            if current.status != ReservationStatus::Pending {
                continue;
            }

            let cancelled = match cancel_in(&txn, current, now.date_naive()).await {
                Ok(cancelled) => cancelled,
                Err(err) if changed_concurrently(&err) => continue,
                Err(err) => return Err(err),
            };
            txn.commit().await?;

            tracing::info!(
                reservation_id = cancelled.id,
                "Unpaid reservation expired"
            );
            expired += 1;
        }

        Ok(expired)
    }

    /// Marks cars RENTED for confirmed reservations whose period covers `today`.
    ///
    /// Cars in maintenance are left alone. Each car is claimed and the reservation
    /// re-read in a transaction, so a cancellation releasing the same car is never
    /// undone.
    pub async fn mark_rentals_started(&self, today: NaiveDate) -> Result<u64, AppError> {
        let running = ReservationRepository::new(self.db)
            .find_confirmed_covering(today)
            .await?;

        let mut started = 0;
        for candidate in running {
            let idle = CarRepository::new(self.db)
                .find_by_id(candidate.car_id)
                .await?
                .is_some_and(|car| car.status == CarStatus::Available);
            if !idle {
                continue;
            }

            let txn = self.db.begin().await?;
            let car_repo = CarRepository::new(&txn);
            if !car_repo.claim(candidate.car_id).await? {
                continue;
            }

            let still_confirmed = ReservationRepository::new(&txn)
                .find_by_id(candidate.id)
                .await?
                .is_some_and(|r| r.status == ReservationStatus::Confirmed);
            let still_idle = car_repo
                .find_by_id(candidate.car_id)
                .await?
                .is_some_and(|car| car.status == CarStatus::Available);
            if !still_confirmed || !still_idle {
                continue;
            }

            car_repo
                .set_status(candidate.car_id, CarStatus::Rented)
                .await?;
            txn.commit().await?;

            tracing::info!(
                car_id = candidate.car_id,
                reservation_id = candidate.id,
                "Rental started"
            );
            started += 1;
        }

        Ok(started)
    }

    /// Completes confirmed reservations that ended before `today`.
    pub async fn complete_finished(&self, today: NaiveDate) -> Result<u64, AppError> {
        let finished = ReservationRepository::new(self.db)
            .find_confirmed_ended_before(today)
            .await?;

        let mut completed = 0;
        for candidate in finished {
            let txn = self.db.begin().await?;

            let Some(current) = ReservationRepository::new(&txn)
                .find_by_id(candidate.id)
                .await?
            else {
                continue;
            };
            if current.status != ReservationStatus::Confirmed {
                continue;
            }

            let done = match complete_in(&txn, current, today).await {
                Ok(done) => done,
                Err(err) if changed_concurrently(&err) => continue,
                Err(err) => return Err(err),
            };
            txn.commit().await?;

            tracing::info!(reservation_id = done.id, "Rental finished");
            completed += 1;
        }

        Ok(completed)
    }
}

/// A compare-and-set status write found the reservation already moved on.
fn changed_concurrently(err: &AppError) -> bool {
    matches!(
        err,
        AppError::ReservationErr(ReservationError::InvalidTransition { .. })
    )
}
