//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned into each handler through
//! Axum's state extraction.

use chrono::Duration;
use sea_orm::DatabaseConnection;

/// Shared resources of the HTTP handlers.
///
/// `DatabaseConnection` is a connection pool, so clones share the pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Lifetime of bearer tokens issued at login and registration.
    pub token_ttl: Duration,
}

impl AppState {
    /// Creates the application state.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `token_ttl` - Lifetime of issued bearer tokens
    pub fn new(db: DatabaseConnection, token_ttl: Duration) -> Self {
        Self { db, token_ttl }
    }
}
