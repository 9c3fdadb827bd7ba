//! Shared helper utilities for factory methods.
//!
//! Provides ID generation used across all factories and convenience methods for creating
//! entities together with their dependencies.

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Today's date in UTC offset by `days`.
pub fn days_from_today(days: i64) -> NaiveDate {
    (Utc::now() + Duration::days(days)).date_naive()
}

/// Creates a reservation together with the user and car it references.
///
/// All entities use default values; the reservation spans three days starting a week
/// from today. Use the individual factories to customize.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, car, reservation))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_reservation_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::car::Model,
        entity::reservation::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let car = crate::factory::car::create_car(db).await?;
    let reservation = crate::factory::reservation::create_reservation(db, car.id, user.id).await?;

    Ok((user, car, reservation))
}
