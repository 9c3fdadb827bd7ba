//! Car factory for creating test car entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test cars with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::car::CarFactory;
///
/// let car = CarFactory::new(&db)
///     .brand("Dacia")
///     .car_type("SUV")
///     .price_per_day_cents(30_000)
///     .build()
///     .await?;
/// ```
pub struct CarFactory<'a> {
    db: &'a DatabaseConnection,
    brand: String,
    model: String,
    year: i32,
    registration_number: String,
    car_type: String,
    agency: String,
    status: String,
    price_per_day_cents: i64,
    image_url: Option<String>,
}

impl<'a> CarFactory<'a> {
    /// Creates a new CarFactory with default values.
    ///
    /// Defaults:
    /// - brand/model: `"Renault"` / `"Clio {id}"`
    /// - year: `2023`
    /// - registration_number: `"REG-{id}"`
    /// - car_type: `"Compact"`, agency: `"Casablanca"`
    /// - status: `"AVAILABLE"`
    /// - price_per_day_cents: `25_000`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            brand: "Renault".to_string(),
            model: format!("Clio {}", id),
            year: 2023,
            registration_number: format!("REG-{}", id),
            car_type: "Compact".to_string(),
            agency: "Casablanca".to_string(),
            status: "AVAILABLE".to_string(),
            price_per_day_cents: 25_000,
            image_url: None,
        }
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn registration_number(mut self, registration_number: impl Into<String>) -> Self {
        self.registration_number = registration_number.into();
        self
    }

    pub fn car_type(mut self, car_type: impl Into<String>) -> Self {
        self.car_type = car_type.into();
        self
    }

    pub fn agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    /// Sets the raw status string (`AVAILABLE`, `RENTED` or `MAINTENANCE`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn price_per_day_cents(mut self, price_per_day_cents: i64) -> Self {
        self.price_per_day_cents = price_per_day_cents;
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Builds and inserts the car entity into the database.
    pub async fn build(self) -> Result<entity::car::Model, DbErr> {
        let now = Utc::now();
        entity::car::ActiveModel {
            brand: ActiveValue::Set(self.brand),
            model: ActiveValue::Set(self.model),
            year: ActiveValue::Set(self.year),
            registration_number: ActiveValue::Set(self.registration_number),
            car_type: ActiveValue::Set(self.car_type),
            agency: ActiveValue::Set(self.agency),
            status: ActiveValue::Set(self.status),
            price_per_day_cents: ActiveValue::Set(self.price_per_day_cents),
            image_url: ActiveValue::Set(self.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an available car with default values.
pub async fn create_car(db: &DatabaseConnection) -> Result<entity::car::Model, DbErr> {
    CarFactory::new(db).build().await
}
