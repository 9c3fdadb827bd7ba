//! Password hashing helpers backed by bcrypt.

use bcrypt::{hash, verify};

use crate::server::error::AppError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hashes a plain-text password with bcrypt.
///
/// Tests build with a low cost so hashing does not dominate runtime.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    #[cfg(test)]
    let cost = 4;
    #[cfg(not(test))]
    let cost = bcrypt::DEFAULT_COST;

    Ok(hash(password, cost)?)
}

/// Checks a plain-text password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    Ok(verify(password, password_hash)?)
}

/// Validates password strength for registration.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
