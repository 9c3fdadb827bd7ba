//! Reservation domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::reservation::{
        CreateReservationDto, GuestDetailsDto, PaginatedReservationsDto, ReservationDto,
    },
    server::{
        error::AppError,
        model::{
            availability::{
                BookedRange, DateRange, PaymentStatus, ReservationStatus, MAX_RENTAL_DAYS,
            },
            car::Car,
        },
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub car_id: i32,
    pub user_id: i32,
    pub range: DateRange,
    pub total_price_cents: i64,
    pub status: ReservationStatus,
    pub payment_status: PaymentStatus,
    pub guest: Option<GuestDetails>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Converted domain model
    /// - `Err(AppError)` - Stored dates are inverted or a status is unknown
    pub fn from_entity(entity: entity::reservation::Model) -> Result<Self, AppError> {
        let guest = match (entity.guest_first_name, entity.guest_last_name, entity.guest_email) {
            (Some(first_name), Some(last_name), Some(email)) => Some(GuestDetails {
                first_name,
                last_name,
                email,
                phone: entity.guest_phone,
            }),
            _ => None,
        };

        Ok(Self {
            id: entity.id,
            car_id: entity.car_id,
            user_id: entity.user_id,
            range: DateRange::new(entity.start_date, entity.end_date)?,
            total_price_cents: entity.total_price_cents,
            status: ReservationStatus::from_stored(&entity.status)?,
            payment_status: PaymentStatus::from_stored(&entity.payment_status)?,
            guest,
            created_at: entity.created_at,
        })
    }

    pub fn booked_range(&self) -> BookedRange {
        BookedRange {
            range: self.range,
            status: self.status,
        }
    }

    pub fn into_dto(self) -> ReservationDto {
        self.into_dto_with_car(None)
    }

    pub fn into_dto_with_car(self, car: Option<Car>) -> ReservationDto {
        let guest = self.guest;
        ReservationDto {
            id: self.id,
            car_id: self.car_id,
            user_id: self.user_id,
            start_date: self.range.start(),
            end_date: self.range.end(),
            total_price_cents: self.total_price_cents,
            status: self.status.as_str().to_string(),
            payment_status: self.payment_status.as_str().to_string(),
            guest_first_name: guest.as_ref().map(|g| g.first_name.clone()),
            guest_last_name: guest.as_ref().map(|g| g.last_name.clone()),
            guest_email: guest.as_ref().map(|g| g.email.clone()),
            guest_phone: guest.and_then(|g| g.phone),
            created_at: self.created_at,
            car: car.map(Car::into_dto),
        }
    }
}

/// Contact details of an anonymous booker.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    /// Lowercased.
    pub email: String,
    pub phone: Option<String>,
}

impl GuestDetails {
    pub fn from_dto(dto: GuestDetailsDto) -> Result<Self, AppError> {
        let first_name = dto.first_name.trim().to_string();
        let last_name = dto.last_name.trim().to_string();
        let email = dto.email.trim().to_lowercase();

        if first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::BadRequest(
                "Guest first and last name are required".to_string(),
            ));
        }
        if !is_plausible_email(&email) {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            phone: dto.phone.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.contains('@')
        }
        None => false,
    }
}

/// Who is booking: an authenticated user or an anonymous guest.
#[derive(Debug, Clone)]
pub enum Booker {
    User(i32),
    Guest(GuestDetails),
}

#[derive(Debug, Clone)]
pub struct CreateReservationParams {
    pub car_id: i32,
    pub range: DateRange,
    pub booker: Booker,
}

impl CreateReservationParams {
    /// Builds booking parameters from the request body.
    ///
    /// # Arguments
    /// - `dto` - Request body
    /// - `user_id` - Authenticated caller, `None` for anonymous bookings
    /// - `today` - Current date; bookings may not start earlier
    pub fn from_dto(
        dto: CreateReservationDto,
        user_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let range = DateRange::new(dto.start_date, dto.end_date)?;
        if range.start() < today {
            return Err(AppError::BadRequest(
                "Start date cannot be in the past".to_string(),
            ));
        }
        if range.days() > MAX_RENTAL_DAYS {
            return Err(AppError::BadRequest(format!(
                "A reservation may cover at most {} days",
                MAX_RENTAL_DAYS
            )));
        }

        let booker = match (user_id, dto.guest) {
            (Some(id), _) => Booker::User(id),
            (None, Some(guest)) => Booker::Guest(GuestDetails::from_dto(guest)?),
            (None, None) => {
                return Err(AppError::BadRequest(
                    "Guest details are required when not logged in".to_string(),
                ))
            }
        };

        Ok(Self {
            car_id: dto.car_id,
            range,
            booker,
        })
    }
}

/// Row values for inserting a reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub car_id: i32,
    pub user_id: i32,
    pub range: DateRange,
    pub total_price_cents: i64,
    pub guest: Option<GuestDetails>,
}

/// Filter for the caller's own reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationScope {
    All,
    /// PENDING or CONFIRMED
    Active,
    /// COMPLETED or CANCELLED
    Past,
}

impl ReservationScope {
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("all") => Ok(Self::All),
            Some("active") => Ok(Self::Active),
            Some("past") => Ok(Self::Past),
            Some(other) => Err(AppError::BadRequest(format!("Unknown scope '{}'", other))),
        }
    }

    pub fn statuses(&self) -> Vec<ReservationStatus> {
        use ReservationStatus::*;

        match self {
            Self::All => ReservationStatus::ALL.to_vec(),
            Self::Active => vec![Pending, Confirmed],
            Self::Past => vec![Completed, Cancelled],
        }
    }
}

/// Status change requested through `PATCH /api/reservations/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationUpdate {
    Cancel,
    Complete,
}

impl ReservationUpdate {
    /// Returns `None` for statuses that cannot be requested by clients.
    pub fn parse(status: &str) -> Option<Self> {
        match status.parse::<ReservationStatus>().ok()? {
            ReservationStatus::Cancelled => Some(Self::Cancel),
            ReservationStatus::Completed => Some(Self::Complete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedReservations {
    pub reservations: Vec<Reservation>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedReservations {
    pub fn into_dto(self) -> PaginatedReservationsDto {
        PaginatedReservationsDto {
            reservations: self
                .reservations
                .into_iter()
                .map(Reservation::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
