//! Bearer token storage. Only SHA-256 digests of tokens are persisted.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};

use crate::server::{error::AppError, model::user::User};

pub struct AuthTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        entity::auth_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Resolves a token digest to its user when the token has not expired at `now`.
    pub async fn find_user_by_valid_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        let result = entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::TokenHash.eq(token_hash))
            .filter(entity::auth_token::Column::ExpiresAt.gt(now))
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        match result {
            Some((_, Some(user))) => User::from_entity(user).map(Some),
            _ => Ok(None),
        }
    }

    /// Deletes one token. Returns whether it existed.
    pub async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::TokenHash.eq(token_hash))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes tokens that expired at or before `now`. Returns how many were removed.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(entity::auth_token::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
