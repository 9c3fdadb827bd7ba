use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::days_from_today, reservation::ReservationFactory},
};

use crate::server::{
    data::{car::CarRepository, notification::NotificationRepository},
    error::{auth::AuthError, reservation::ReservationError, AppError},
    model::{
        availability::{CarStatus, DateRange, PaymentStatus, ReservationStatus},
        notification::NotificationKind,
        reservation::{Booker, CreateReservationParams, GuestDetails, ReservationScope},
    },
    service::{
        reservation::ReservationService,
        test::{admin_user, car_priced, registered_user},
    },
};

mod cancel;
mod complete;
mod create;
mod queries;
mod schedule;

fn booking(car_id: i32, booker: Booker, start: i64, end: i64) -> CreateReservationParams {
    CreateReservationParams {
        car_id,
        range: DateRange::new(days_from_today(start), days_from_today(end)).unwrap(),
        booker,
    }
}

fn guest(email: &str) -> GuestDetails {
    GuestDetails {
        first_name: "Hajar".to_string(),
        last_name: "Benali".to_string(),
        email: email.to_string(),
        phone: None,
    }
}
