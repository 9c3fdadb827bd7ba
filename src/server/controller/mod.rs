//! HTTP handlers.
//!
//! Handlers authenticate through `AuthGuard`, convert DTOs into parameter types, call a
//! service and convert the returned domain models back into DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::util::pagination::clamp_per_page;

pub mod auth;
pub mod car;
pub mod payment;
pub mod reservation;
pub mod stats;
pub mod user;

#[cfg(test)]
mod test;

/// Zero-indexed page query shared by the paginated admin listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl PaginationParams {
    pub fn per_page(&self) -> u64 {
        clamp_per_page(self.per_page)
    }
}

fn default_per_page() -> u64 {
    10
}
