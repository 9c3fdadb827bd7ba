//! Car Rental Test Utils
//!
//! Shared testing utilities for the car rental backend. The crate offers a builder for test
//! contexts backed by in-memory SQLite databases, plus factories that insert entities with
//! sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: fluent builder for configuring test environments
//! - **TestContext**: test environment holding the database connection
//! - **TestError**: errors that can occur during test setup
//! - **factory**: builder-style inserts for every entity
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Car;
//!
//! #[tokio::test]
//! async fn test_car_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Car)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
