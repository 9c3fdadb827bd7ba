use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::car::CarDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub car_id: i32,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price_cents: i64,
    pub status: String,
    pub payment_status: String,
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Present on endpoints that join the reserved car.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<CarDto>,
}

/// Contact details supplied by anonymous callers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestDetailsDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReservationDto {
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Required when no bearer token is presented, ignored otherwise.
    pub guest: Option<GuestDetailsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReservationStatusDto {
    /// `cancelled` or `completed`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedReservationsDto {
    pub reservations: Vec<ReservationDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
