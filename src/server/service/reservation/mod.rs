//! Reservation service.
//!
//! Owns the booking transaction and the reservation lifecycle. The service is split by
//! concern:
//! - `mod.rs` - booking and read access
//! - `lifecycle` - cancel and complete transitions
//! - `schedule` - time-driven transitions run by the scheduler

pub mod lifecycle;
pub mod schedule;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        car::CarRepository, notification::NotificationRepository,
        reservation::ReservationRepository, user::UserRepository,
    },
    error::{internal::InternalError, reservation::ReservationError, AppError},
    model::{
        availability::{check_availability, quote, Availability, ReservationStatus},
        car::Car,
        reservation::{
            Booker, CreateReservationParams, GuestDetails, NewReservation,
            PaginatedReservations, Reservation, ReservationScope,
        },
        user::{NewUser, Role, User},
    },
    service::notification::compose::{self, Recipient},
    util::pagination::total_pages,
};

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a car for a registered user or a guest.
    ///
    /// Everything happens in one transaction that starts by claiming the car row, so two
    /// concurrent bookings of the same car run one after the other and the second sees
    /// the first's reservation. The reservation-confirmation notification is written to
    /// the outbox in the same transaction.
    ///
    /// # Arguments
    /// - `params` - Validated car id, date range and booker
    ///
    /// # Returns
    /// - `Ok(Reservation)` - PENDING reservation with the quoted total
    /// - `Err(AppError::NotFound)` - Car or booking user does not exist
    /// - `Err(AppError::BadRequest)` - Guest email belongs to a registered account
    /// - `Err(ReservationError::CarUnavailable)` - Car in maintenance or already booked
    pub async fn create(&self, params: CreateReservationParams) -> Result<Reservation, AppError> {
        let txn = self.db.begin().await?;

        let car_repo = CarRepository::new(&txn);
        if !car_repo.claim(params.car_id).await? {
            return Err(car_not_found());
        }
        let car = car_repo
            .find_by_id(params.car_id)
            .await?
            .ok_or_else(car_not_found)?;

        let (user, guest) = match params.booker {
            Booker::User(user_id) => {
                let user = UserRepository::new(&txn)
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                (user, None)
            }
            Booker::Guest(guest) => (resolve_guest(&txn, &guest).await?, Some(guest)),
        };

        let reservation_repo = ReservationRepository::new(&txn);
        let overlapping = reservation_repo
            .find_overlapping(car.id, &params.range)
            .await?;
        let booked: Vec<_> = overlapping.iter().map(Reservation::booked_range).collect();

        if let Availability::Unavailable(reason) =
            check_availability(car.status, &params.range, &booked)
        {
            tracing::warn!(
                car_id = car.id,
                start = %params.range.start(),
                end = %params.range.end(),
                "Booking rejected: {}",
                reason
            );
            return Err(ReservationError::CarUnavailable(reason.to_string()).into());
        }

        let reservation = reservation_repo
            .create(NewReservation {
                car_id: car.id,
                user_id: user.id,
                range: params.range,
                total_price_cents: quote(car.price_per_day_cents, &params.range)?,
                guest,
            })
            .await?;

        let recipient = recipient_of(&reservation, &user);
        NotificationRepository::new(&txn)
            .enqueue(compose::reservation_confirmation(
                &recipient,
                &reservation,
                &car,
            ))
            .await?;

        txn.commit().await?;

        tracing::info!(
            reservation_id = reservation.id,
            car_id = car.id,
            user_id = user.id,
            total_cents = reservation.total_price_cents,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Gets a reservation the caller may see.
    ///
    /// Reservations of other users are reported as missing rather than forbidden.
    pub async fn get_visible(&self, id: i32, caller: &User) -> Result<Reservation, AppError> {
        let reservation = ReservationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(reservation_not_found)?;

        ensure_visible(&reservation, caller)?;

        Ok(reservation)
    }

    /// Gets a visible reservation together with its car.
    pub async fn get_with_car(
        &self,
        id: i32,
        caller: &User,
    ) -> Result<(Reservation, Option<Car>), AppError> {
        let reservation = self.get_visible(id, caller).await?;
        let car = CarRepository::new(self.db)
            .find_by_id(reservation.car_id)
            .await?;

        Ok((reservation, car))
    }

    /// The caller's reservations in `scope`, newest first, each with its car.
    pub async fn my(
        &self,
        user_id: i32,
        scope: ReservationScope,
    ) -> Result<Vec<(Reservation, Option<Car>)>, AppError> {
        let reservations = ReservationRepository::new(self.db)
            .get_by_user(user_id, &scope.statuses())
            .await?;

        let car_repo = CarRepository::new(self.db);
        let mut result = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let car = car_repo.find_by_id(reservation.car_id).await?;
            result.push((reservation, car));
        }

        Ok(result)
    }

    /// Gets a page of all reservations, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<ReservationStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedReservations, AppError> {
        let (reservations, total) = ReservationRepository::new(self.db)
            .get_paginated(status, page, per_page)
            .await?;

        Ok(PaginatedReservations {
            reservations,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }
}

/// Finds or creates the guest account for an anonymous booking.
async fn resolve_guest<C: ConnectionTrait>(
    db: &C,
    guest: &GuestDetails,
) -> Result<User, AppError> {
    let repo = UserRepository::new(db);

    match repo.find_by_email(&guest.email).await? {
        Some(user) if user.is_registered() => Err(AppError::BadRequest(
            "An account exists for this email, please log in".to_string(),
        )),
        Some(user) => Ok(user),
        None => {
            let user = repo
                .create(NewUser {
                    first_name: guest.first_name.clone(),
                    last_name: guest.last_name.clone(),
                    email: guest.email.clone(),
                    phone: guest.phone.clone(),
                    password_hash: None,
                    role: Role::User,
                })
                .await?;

            tracing::debug!(user_id = user.id, "Guest account created");

            Ok(user)
        }
    }
}

/// Guest details on the reservation win over the linked account.
pub(crate) fn recipient_of(reservation: &Reservation, user: &User) -> Recipient {
    match &reservation.guest {
        Some(guest) => Recipient {
            name: guest.first_name.clone(),
            email: guest.email.clone(),
        },
        None => Recipient {
            name: user.first_name.clone(),
            email: user.email.clone(),
        },
    }
}

/// Loads the booking user and resolves who should hear about `reservation`.
pub(crate) async fn load_recipient<C: ConnectionTrait>(
    db: &C,
    reservation: &Reservation,
) -> Result<Recipient, AppError> {
    let user = UserRepository::new(db)
        .find_by_id(reservation.user_id)
        .await?
        .ok_or_else(|| InternalError::MissingRelation {
            entity: "user",
            id: reservation.user_id,
            from: format!("reservation {}", reservation.id),
        })?;

    Ok(recipient_of(reservation, &user))
}

pub(crate) fn ensure_visible(reservation: &Reservation, caller: &User) -> Result<(), AppError> {
    if reservation.user_id != caller.id && !caller.is_admin() {
        return Err(reservation_not_found());
    }

    Ok(())
}

pub(crate) fn reservation_not_found() -> AppError {
    AppError::NotFound("Reservation not found".to_string())
}

fn car_not_found() -> AppError {
    AppError::NotFound("Car not found".to_string())
}
