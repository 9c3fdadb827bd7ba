//! User service for business logic.
//!
//! This module provides the `UserService` for profile management and admin role
//! administration. It works with domain models rather than DTOs.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{PaginatedUsers, Role, UpdateProfileParams, User},
    util::pagination::total_pages,
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Updates the caller's own profile.
    ///
    /// Only first name, last name and phone can change; email and role are fixed here.
    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .update_profile(id, params)
            .await?
            .ok_or_else(user_not_found)?;

        tracing::debug!(user_id = user.id, "Profile updated");

        Ok(user)
    }

    /// Retrieves all users with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Users per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the requested page with pagination metadata
    pub async fn list(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Grants or revokes admin privileges.
    ///
    /// # Arguments
    /// - `caller` - Admin performing the change
    /// - `target_id` - User whose role changes
    /// - `admin` - `true` to grant, `false` to revoke
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new role
    /// - `Err(AppError::BadRequest)` - Admin tried to revoke their own privileges
    /// - `Err(AppError::NotFound)` - Target user does not exist
    pub async fn set_admin(
        &self,
        caller: &User,
        target_id: i32,
        admin: bool,
    ) -> Result<User, AppError> {
        if !admin && caller.id == target_id {
            return Err(AppError::BadRequest(
                "You cannot remove your own admin privileges".to_string(),
            ));
        }

        let role = if admin { Role::Admin } else { Role::User };
        let user = UserRepository::new(self.db)
            .set_role(target_id, role)
            .await?
            .ok_or_else(user_not_found)?;

        tracing::info!(
            user_id = user.id,
            changed_by = caller.id,
            role = user.role.as_str(),
            "User role changed"
        );

        Ok(user)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
