//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from business logic. Each repository borrows any `ConnectionTrait`
//! implementor, so the same methods run against the pool or inside a transaction.

pub mod auth_token;
pub mod car;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod user;

#[cfg(test)]
mod test;
