//! Request and response bodies of the HTTP API.

pub mod api;
pub mod auth;
pub mod car;
pub mod invoice;
pub mod payment;
pub mod reservation;
pub mod stats;
pub mod user;
