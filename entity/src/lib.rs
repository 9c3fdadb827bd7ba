//! SeaORM entity models for the car rental schema.

pub mod prelude;

pub mod auth_token;
pub mod car;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod user;
