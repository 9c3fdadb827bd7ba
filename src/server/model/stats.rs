use crate::{
    model::stats::ReservationStatsDto,
    server::model::availability::ReservationStatus,
};

/// Reservation counts per status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationStats {
    pub pending: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub completed: u64,
}

impl ReservationStats {
    pub fn add(&mut self, status: ReservationStatus, count: u64) {
        match status {
            ReservationStatus::Pending => self.pending += count,
            ReservationStatus::Confirmed => self.confirmed += count,
            ReservationStatus::Cancelled => self.cancelled += count,
            ReservationStatus::Completed => self.completed += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.confirmed + self.cancelled + self.completed
    }

    pub fn into_dto(self) -> ReservationStatsDto {
        ReservationStatsDto {
            total: self.total(),
            pending: self.pending,
            confirmed: self.confirmed,
            cancelled: self.cancelled,
            completed: self.completed,
        }
    }
}
