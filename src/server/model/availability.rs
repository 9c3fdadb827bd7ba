//! Booking domain core.
//!
//! Date ranges, the status enums of cars, reservations and payments, price quoting and
//! the availability decision. Everything here is pure; the services feed it rows read
//! inside the booking transaction.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{
    model::car::AvailabilityDto,
    server::error::{internal::InternalError, AppError},
};

/// Inclusive calendar date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `end < start`.
    ///
    /// # Returns
    /// - `Ok(DateRange)` - Valid inclusive range
    /// - `Err(AppError::BadRequest)` - End date precedes start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::BadRequest(
                "End date must be on or after start date".to_string(),
            ));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Two inclusive ranges overlap when each starts no later than the other ends.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Inclusive day count, so a same-day rental is one day.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Representation stored in the database and sent over the API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parses a stored value, mapping unknown strings to an internal error.
            pub fn from_stored(value: &str) -> Result<Self, AppError> {
                value.parse::<$name>().map_err(|_| {
                    InternalError::UnknownStatus {
                        kind: $kind,
                        value: value.to_string(),
                    }
                    .into()
                })
            }
        }

        impl FromStr for $name {
            type Err = ();

            /// Case-insensitive so query strings may use `confirmed` or `CONFIRMED`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.trim().to_ascii_uppercase();
                match upper.as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Lifecycle of a reservation.
    ReservationStatus, "reservation", {
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Cancelled => "CANCELLED",
        Completed => "COMPLETED",
    }
);

string_enum!(
    /// Money state of a reservation.
    PaymentStatus, "payment", {
        Pending => "PENDING",
        Paid => "PAID",
        Refunded => "REFUNDED",
    }
);

string_enum!(
    /// Operational state of a car.
    CarStatus, "car", {
        Available => "AVAILABLE",
        Rented => "RENTED",
        Maintenance => "MAINTENANCE",
    }
);

string_enum!(
    /// Result reported for a single payment attempt.
    PaymentOutcome, "payment outcome", {
        Success => "SUCCESS",
        Failed => "FAILED",
        Pending => "PENDING",
    }
);

impl ReservationStatus {
    /// Active reservations hold their car.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;

        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// Statuses counted as active when querying for overlaps.
    pub fn active() -> [ReservationStatus; 2] {
        [Self::Pending, Self::Confirmed]
    }
}

/// Longest rental a single reservation may cover, in days.
pub const MAX_RENTAL_DAYS: i64 = 365;

/// Highest daily price a car may carry, in cents.
pub const MAX_PRICE_PER_DAY_CENTS: i64 = 10_000_000;

/// Total price for renting at `price_per_day_cents` over `range`.
///
/// # Returns
/// - `Ok(i64)` - Daily price times inclusive day count
/// - `Err(AppError::BadRequest)` - The total does not fit in an `i64`
pub fn quote(price_per_day_cents: i64, range: &DateRange) -> Result<i64, AppError> {
    price_per_day_cents
        .checked_mul(range.days())
        .ok_or_else(|| AppError::BadRequest("Rental total is too large".to_string()))
}

pub const CAR_NOT_AVAILABLE: &str = "Car is not available for reservation";
pub const CAR_ALREADY_RESERVED: &str = "Car is already reserved for the selected dates";

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(&'static str),
}

impl Availability {
    pub fn into_dto(self) -> AvailabilityDto {
        match self {
            Self::Available => AvailabilityDto {
                available: true,
                message: None,
            },
            Self::Unavailable(reason) => AvailabilityDto {
                available: false,
                message: Some(reason.to_string()),
            },
        }
    }
}

/// An existing reservation as seen by the availability check.
#[derive(Debug, Clone, Copy)]
pub struct BookedRange {
    pub range: DateRange,
    pub status: ReservationStatus,
}

/// Decides whether a car in `car_status` can be booked for `range`.
///
/// `existing` may contain any reservations of the car; only active ones that overlap
/// the range block the booking. `RENTED` is informational and does not block future
/// ranges.
pub fn check_availability(
    car_status: CarStatus,
    range: &DateRange,
    existing: &[BookedRange],
) -> Availability {
    if car_status == CarStatus::Maintenance {
        return Availability::Unavailable(CAR_NOT_AVAILABLE);
    }

    let conflict = existing
        .iter()
        .any(|booked| booked.status.is_active() && booked.range.overlaps(range));

    if conflict {
        Availability::Unavailable(CAR_ALREADY_RESERVED)
    } else {
        Availability::Available
    }
}
