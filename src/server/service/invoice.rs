//! Invoice assembly.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{car::CarRepository, payment::PaymentRepository, user::UserRepository},
    error::{internal::InternalError, AppError},
    model::{invoice::Invoice, user::User},
    service::reservation::ReservationService,
};

pub struct InvoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvoiceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the invoice of a reservation the caller may see.
    pub async fn get_for(&self, reservation_id: i32, caller: &User) -> Result<Invoice, AppError> {
        let reservation = ReservationService::new(self.db)
            .get_visible(reservation_id, caller)
            .await?;

        let missing = |entity: &'static str, id: i32| InternalError::MissingRelation {
            entity,
            id,
            from: format!("reservation {}", reservation_id),
        };

        let client = UserRepository::new(self.db)
            .find_by_id(reservation.user_id)
            .await?
            .ok_or_else(|| missing("user", reservation.user_id))?;
        let car = CarRepository::new(self.db)
            .find_by_id(reservation.car_id)
            .await?
            .ok_or_else(|| missing("car", reservation.car_id))?;
        let last_payment = PaymentRepository::new(self.db)
            .latest_for_reservation(reservation.id)
            .await?;

        Ok(Invoice {
            reservation,
            client,
            car,
            last_payment,
            issued_at: Utc::now(),
        })
    }
}
