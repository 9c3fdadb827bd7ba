//! Admin dashboard figures.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::reservation::ReservationRepository, error::AppError, model::stats::ReservationStats,
};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Total of all PAID reservations, in cents.
    pub async fn revenue(&self) -> Result<i64, AppError> {
        ReservationRepository::new(self.db).sum_paid_totals().await
    }

    pub async fn reservations(&self) -> Result<ReservationStats, AppError> {
        ReservationRepository::new(self.db).count_by_status().await
    }
}
