//! Auth token factory for creating stored bearer tokens.
//!
//! The factory stores whatever hash it is given; tests that authenticate through the
//! HTTP layer should hash the raw token the same way the server does.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct AuthTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    token_hash: String,
    expires_at: DateTime<Utc>,
}

impl<'a> AuthTokenFactory<'a> {
    /// Defaults to a unique placeholder hash expiring in 24 hours.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            token_hash: format!("hash_{}", id),
            expires_at: Utc::now() + Duration::hours(24),
        }
    }

    pub fn token_hash(mut self, token_hash: impl Into<String>) -> Self {
        self.token_hash = token_hash.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub async fn build(self) -> Result<entity::auth_token::Model, DbErr> {
        entity::auth_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            token_hash: ActiveValue::Set(self.token_hash),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_auth_token(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::auth_token::Model, DbErr> {
    AuthTokenFactory::new(db, user_id).build().await
}
