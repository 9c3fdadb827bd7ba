//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Status columns are parsed into the
//! enums of `availability` on the way in, so services never compare raw strings.

pub mod availability;
pub mod car;
pub mod invoice;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod stats;
pub mod user;
