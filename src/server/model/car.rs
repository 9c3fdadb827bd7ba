//! Car domain models and parameters.

use chrono::{DateTime, Datelike, Utc};

use crate::{
    model::car::{CarDto, CarInputDto, CarSearchQuery, PaginatedCarsDto},
    server::{
        error::AppError,
        model::availability::{CarStatus, DateRange, MAX_PRICE_PER_DAY_CENTS},
        util::pagination::clamp_per_page,
    },
};

/// Default page size for catalog listings.
pub const DEFAULT_CARS_PER_PAGE: u64 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub car_type: String,
    pub agency: String,
    pub status: CarStatus,
    pub price_per_day_cents: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Car)` - Converted domain model
    /// - `Err(AppError::InternalErr)` - Stored status is not a known `CarStatus`
    pub fn from_entity(entity: entity::car::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            brand: entity.brand,
            model: entity.model,
            year: entity.year,
            registration_number: entity.registration_number,
            car_type: entity.car_type,
            agency: entity.agency,
            status: CarStatus::from_stored(&entity.status)?,
            price_per_day_cents: entity.price_per_day_cents,
            image_url: entity.image_url,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CarDto {
        CarDto {
            id: self.id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            registration_number: self.registration_number,
            car_type: self.car_type,
            agency: self.agency,
            status: self.status.as_str().to_string(),
            price_per_day_cents: self.price_per_day_cents,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }

    /// Display name used in notifications and invoices.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// Validated fields for creating or replacing a car.
#[derive(Debug, Clone)]
pub struct CarParams {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub car_type: String,
    pub agency: String,
    pub status: CarStatus,
    pub price_per_day_cents: i64,
    pub image_url: Option<String>,
}

impl CarParams {
    /// Validates an admin-supplied car body.
    ///
    /// Text fields must be non-blank, the daily price within
    /// `1..=MAX_PRICE_PER_DAY_CENTS` and the year within `1900..=next year`.
    pub fn from_dto(dto: CarInputDto) -> Result<Self, AppError> {
        let max_year = Utc::now().year() + 1;
        if !(1900..=max_year).contains(&dto.year) {
            return Err(AppError::BadRequest(format!(
                "Year must be between 1900 and {}",
                max_year
            )));
        }

        if dto.price_per_day_cents <= 0 {
            return Err(AppError::BadRequest(
                "Price per day must be positive".to_string(),
            ));
        }
        if dto.price_per_day_cents > MAX_PRICE_PER_DAY_CENTS {
            return Err(AppError::BadRequest(format!(
                "Price per day may not exceed {} cents",
                MAX_PRICE_PER_DAY_CENTS
            )));
        }

        let status = match dto.status.as_deref() {
            None => CarStatus::Available,
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Unknown car status '{}'", raw)))?,
        };

        Ok(Self {
            brand: required("brand", dto.brand)?,
            model: required("model", dto.model)?,
            year: dto.year,
            registration_number: required("registration_number", dto.registration_number)?
                .to_uppercase(),
            car_type: required("car_type", dto.car_type)?,
            agency: required("agency", dto.agency)?,
            status,
            price_per_day_cents: dto.price_per_day_cents,
            image_url: dto.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }

    Ok(trimmed.to_string())
}

/// Conjunctive catalog filters. Every `None` matches all cars.
#[derive(Debug, Clone, Default)]
pub struct CarSearchParams {
    pub car_type: Option<String>,
    pub agency: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub status: Option<CarStatus>,
    /// When set, only cars free for the whole range and not in maintenance match.
    pub available_for: Option<DateRange>,
    pub page: u64,
    pub per_page: u64,
}

impl CarSearchParams {
    /// Builds search filters from query parameters.
    ///
    /// Dates only filter when both are present; a range with `end < start` is rejected.
    pub fn from_query(query: CarSearchQuery) -> Result<Self, AppError> {
        let available_for = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
            _ => None,
        };

        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|raw| {
                raw.parse::<CarStatus>()
                    .map_err(|_| AppError::BadRequest(format!("Unknown car status '{}'", raw)))
            })
            .transpose()?;

        Ok(Self {
            car_type: query.car_type.filter(|s| !s.is_empty()),
            agency: query.agency.filter(|s| !s.is_empty()),
            min_price_cents: query.min_price,
            max_price_cents: query.max_price,
            status,
            available_for,
            page: query.page,
            per_page: clamp_per_page(query.per_page.unwrap_or(DEFAULT_CARS_PER_PAGE)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedCars {
    pub cars: Vec<Car>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCars {
    pub fn into_dto(self) -> PaginatedCarsDto {
        PaginatedCarsDto {
            cars: self.cars.into_iter().map(Car::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
