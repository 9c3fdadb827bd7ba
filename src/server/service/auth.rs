//! Registration, login and bearer token lifecycle.
//!
//! Tokens are random strings handed to the client once; only their SHA-256 digests are
//! stored, so a leaked database does not leak usable tokens.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{auth_token::AuthTokenRepository, user::UserRepository},
    error::{auth::AuthError, is_unique_violation, AppError},
    model::user::{AuthSession, NewUser, RegisterParams, Role, User},
    util::{
        password::{hash_password, validate_password, verify_password},
        token::{generate_token, hash_token},
    },
};

const EMAIL_TAKEN: &str = "An account with this email already exists";

/// Service for account registration and bearer token authentication.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `token_ttl` - How long issued tokens stay valid
    pub fn new(db: &'a DatabaseConnection, token_ttl: Duration) -> Self {
        Self { db, token_ttl }
    }

    /// Registers an account and issues a token.
    ///
    /// A guest account created by an earlier anonymous booking with the same email is
    /// upgraded in place, keeping its reservations.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - The registered user and a fresh token
    /// - `Err(AppError::BadRequest)` - Password too short
    /// - `Err(AppError::Conflict)` - Email already belongs to a registered account
    pub async fn register(&self, params: RegisterParams) -> Result<AuthSession, AppError> {
        validate_password(&params.password)?;

        let user_repo = UserRepository::new(self.db);
        let existing = user_repo.find_by_email(&params.email).await?;
        if existing.as_ref().is_some_and(User::is_registered) {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let new_user = NewUser {
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            phone: params.phone,
            password_hash: Some(hash_password(&params.password)?),
            role: Role::User,
        };

        let user = match existing {
            Some(guest) => {
                let upgraded = user_repo
                    .upgrade_guest(guest.id, new_user)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                tracing::info!(user_id = upgraded.id, "Guest account registered");
                upgraded
            }
            None => {
                let created = user_repo.create(new_user).await.map_err(|err| match err {
                    AppError::DbErr(ref db_err) if is_unique_violation(db_err) => {
                        AppError::Conflict(EMAIL_TAKEN.to_string())
                    }
                    other => other,
                })?;
                tracing::info!(user_id = created.id, "User registered");
                created
            }
        };

        self.issue_token(user).await
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown emails, guest accounts and wrong passwords all fail with the same
    /// `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let email = email.trim().to_lowercase();

        let user = UserRepository::new(self.db)
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, password_hash)? {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(user_id = user.id, "User logged in");

        self.issue_token(user).await
    }

    /// Revokes a token. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let removed = AuthTokenRepository::new(self.db)
            .delete_by_hash(&hash_token(token))
            .await?;

        if removed {
            tracing::debug!("Token revoked");
        }

        Ok(())
    }

    /// Deletes tokens that expired at or before `now`.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        AuthTokenRepository::new(self.db).delete_expired(now).await
    }

    /// Creates or promotes the configured admin when no admin exists yet.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The bootstrapped admin
    /// - `Ok(None)` - An admin already exists, nothing changed
    pub async fn bootstrap_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);
        if user_repo.admin_exists().await? {
            return Ok(None);
        }

        validate_password(password)?;
        let email = email.trim().to_lowercase();

        let admin = match user_repo.find_by_email(&email).await? {
            Some(user) => {
                let user = if user.is_registered() {
                    user
                } else {
                    user_repo
                        .upgrade_guest(
                            user.id,
                            NewUser {
                                first_name: user.first_name.clone(),
                                last_name: user.last_name.clone(),
                                email: user.email.clone(),
                                phone: user.phone.clone(),
                                password_hash: Some(hash_password(password)?),
                                role: Role::Admin,
                            },
                        )
                        .await?
                        .unwrap_or(user)
                };
                user_repo
                    .set_role(user.id, Role::Admin)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            }
            None => {
                user_repo
                    .create(NewUser {
                        first_name: "Admin".to_string(),
                        last_name: "CarRentalConnect".to_string(),
                        email,
                        phone: None,
                        password_hash: Some(hash_password(password)?),
                        role: Role::Admin,
                    })
                    .await?
            }
        };

        tracing::info!(user_id = admin.id, email = %admin.email, "Admin account bootstrapped");

        Ok(Some(admin))
    }

    async fn issue_token(&self, user: User) -> Result<AuthSession, AppError> {
        let token = generate_token();
        let expires_at = Utc::now()
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| AppError::InternalError("Token lifetime out of range".to_string()))?;

        AuthTokenRepository::new(self.db)
            .create(user.id, hash_token(&token), expires_at)
            .await?;

        Ok(AuthSession {
            user,
            token,
            expires_at,
        })
    }
}
