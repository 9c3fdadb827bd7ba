use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarDto {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub car_type: String,
    pub agency: String,
    /// `AVAILABLE`, `RENTED` or `MAINTENANCE`
    pub status: String,
    pub price_per_day_cents: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or replacing a car.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarInputDto {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub car_type: String,
    pub agency: String,
    /// Defaults to `AVAILABLE`
    pub status: Option<String>,
    pub price_per_day_cents: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCarsDto {
    pub cars: Vec<CarDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarSearchQuery {
    pub car_type: Option<String>,
    pub agency: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
