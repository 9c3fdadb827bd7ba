//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories insert directly
//! through SeaORM active models, bypassing service validation, so tests can arrange any
//! state they need.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let car = factory::create_car(&db).await?;
//!
//!     let (user, car, reservation) =
//!         factory::helpers::create_reservation_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let car = factory::car::CarFactory::new(&db)
//!     .agency("Casablanca")
//!     .price_per_day_cents(45_00)
//!     .status("MAINTENANCE")
//!     .build()
//!     .await?;
//! ```

pub mod auth_token;
pub mod car;
pub mod helpers;
pub mod notification;
pub mod payment;
pub mod reservation;
pub mod user;

pub use auth_token::create_auth_token;
pub use car::create_car;
pub use notification::create_notification;
pub use payment::create_payment;
pub use reservation::create_reservation;
pub use user::create_user;
