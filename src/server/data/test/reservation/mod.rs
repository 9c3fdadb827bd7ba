use crate::server::{
    data::reservation::ReservationRepository,
    error::{reservation::ReservationError, AppError},
    model::{
        availability::{DateRange, PaymentStatus, ReservationStatus},
        reservation::{GuestDetails, NewReservation},
    },
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::days_from_today, reservation::ReservationFactory},
};

mod find_overlapping;
mod get_by_user;
mod lifecycle_queries;
mod stats;
