use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub reservation_id: i32,
    pub issued_at: DateTime<Utc>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    /// Brand, model and year, e.g. `Dacia Duster (2023)`
    pub car: String,
    pub registration_number: String,
    pub agency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub price_per_day_cents: i64,
    pub total_cents: i64,
    pub reservation_status: String,
    pub payment_status: String,
    /// Method of the most recent payment, if any.
    pub payment_method: Option<String>,
}
