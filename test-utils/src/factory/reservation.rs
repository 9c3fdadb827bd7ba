//! Reservation factory for creating test reservation entities.

use crate::factory::helpers::days_from_today;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reservations with customizable fields.
///
/// The total price is not derived from the car; set it explicitly when a test depends on
/// it.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::reservation::ReservationFactory;
///
/// let reservation = ReservationFactory::new(&db, car.id, user.id)
///     .dates(start, end)
///     .status("CONFIRMED")
///     .payment_status("PAID")
///     .build()
///     .await?;
/// ```
pub struct ReservationFactory<'a> {
    db: &'a DatabaseConnection,
    car_id: i32,
    user_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_price_cents: i64,
    status: String,
    payment_status: String,
    guest: Option<(String, String, String)>,
    created_at: chrono::DateTime<Utc>,
}

impl<'a> ReservationFactory<'a> {
    /// Creates a new ReservationFactory with default values.
    ///
    /// Defaults:
    /// - dates: 7 to 9 days from today (3 days inclusive)
    /// - total_price_cents: `75_000`
    /// - status / payment_status: `"PENDING"` / `"PENDING"`
    /// - created_at: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `car_id` - ID of the reserved car
    /// - `user_id` - ID of the booking user
    pub fn new(db: &'a DatabaseConnection, car_id: i32, user_id: i32) -> Self {
        Self {
            db,
            car_id,
            user_id,
            start_date: days_from_today(7),
            end_date: days_from_today(9),
            total_price_cents: 75_000,
            status: "PENDING".to_string(),
            payment_status: "PENDING".to_string(),
            guest: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the inclusive date range.
    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn total_price_cents(mut self, total_price_cents: i64) -> Self {
        self.total_price_cents = total_price_cents;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    /// Stores guest contact details (first name, last name, email) on the reservation.
    pub fn guest(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.guest = Some((first_name.into(), last_name.into(), email.into()));
        self
    }

    /// Backdates the creation timestamp, used to test pending-hold expiry.
    pub fn created_at(mut self, created_at: chrono::DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the reservation entity into the database.
    pub async fn build(self) -> Result<entity::reservation::Model, DbErr> {
        let (guest_first_name, guest_last_name, guest_email) = match self.guest {
            Some((first, last, email)) => (Some(first), Some(last), Some(email)),
            None => (None, None, None),
        };

        entity::reservation::ActiveModel {
            car_id: ActiveValue::Set(self.car_id),
            user_id: ActiveValue::Set(self.user_id),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            total_price_cents: ActiveValue::Set(self.total_price_cents),
            status: ActiveValue::Set(self.status),
            payment_status: ActiveValue::Set(self.payment_status),
            guest_first_name: ActiveValue::Set(guest_first_name),
            guest_last_name: ActiveValue::Set(guest_last_name),
            guest_email: ActiveValue::Set(guest_email),
            guest_phone: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending reservation with default values.
pub async fn create_reservation(
    db: &DatabaseConnection,
    car_id: i32,
    user_id: i32,
) -> Result<entity::reservation::Model, DbErr> {
    ReservationFactory::new(db, car_id, user_id).build().await
}
