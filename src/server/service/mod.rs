//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Booking rules, status transitions, access checks on owned data
//! - **Orchestration**: Coordinating repositories and the notification outbox
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Booking, payment and cancellation run in one transaction

pub mod auth;
pub mod car;
pub mod invoice;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod stats;
pub mod user;

#[cfg(test)]
mod test;
