use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::auth_token::AuthTokenRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    util::token::hash_token,
};

pub enum Permission {
    Admin,
}

/// Resolves the `Authorization: Bearer` header of a request to a user.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, headers: &'a HeaderMap) -> Self {
        Self { db, headers }
    }

    /// Requires a valid bearer token and every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding all permissions
    /// - `Err(AuthError::MissingToken)` - No bearer token on the request
    /// - `Err(AuthError::InvalidToken)` - Token unknown, revoked or expired
    /// - `Err(AuthError::AccessDenied)` - A permission is not held
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user = self.optional().await?.ok_or(AuthError::MissingToken)?;

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an admin-only operation without admin role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Authenticates the caller if a bearer token is present.
    ///
    /// A request without a token is anonymous; a request with a bad token is rejected.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        let Some(token) = self.bearer_token()? else {
            return Ok(None);
        };

        let user = AuthTokenRepository::new(self.db)
            .find_user_by_valid_hash(&hash_token(token), Utc::now())
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(Some(user))
    }

    /// Raw token from the request, if any.
    pub fn bearer_token(&self) -> Result<Option<&'a str>, AppError> {
        let Some(value) = self.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };

        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidToken)?;

        Ok(Some(token))
    }
}
