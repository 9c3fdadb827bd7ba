//! User domain models and parameters.
//!
//! Users are either registered (with a password hash) or guest accounts created by
//! anonymous bookings. Guests cannot log in until they register with the same email.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        auth::RegisterDto,
        user::{PaginatedUsersDto, UpdateProfileDto, UserDto},
    },
    server::{
        error::{internal::InternalError, AppError},
        model::reservation::is_plausible_email,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    fn from_stored(value: &str) -> Result<Self, AppError> {
        match value {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(InternalError::UnknownStatus {
                kind: "role",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// User with identity, contact details and role.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// `None` for guest accounts.
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - Converted domain model
    /// - `Err(AppError::InternalErr)` - Stored role is neither `USER` nor `ADMIN`
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            password_hash: entity.password_hash,
            role: Role::from_stored(&entity.role)?,
            created_at: entity.created_at,
        })
    }

    /// Converts the user to a DTO. The password hash never leaves the server.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            registered: self.is_registered(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            role: self.role.as_str().to_string(),
            created_at: self.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_registered(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Row values for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub role: Role,
}

/// Validated registration request. The password is still plain text here.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub first_name: String,
    pub last_name: String,
    /// Lowercased.
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

impl RegisterParams {
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let first_name = dto.first_name.trim().to_string();
        let last_name = dto.last_name.trim().to_string();
        let email = dto.email.trim().to_lowercase();

        if first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::BadRequest(
                "First and last name are required".to_string(),
            ));
        }
        if !is_plausible_email(&email) {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            password: dto.password,
            phone: dto.phone.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Profile fields a user may change; `None` leaves the value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, AppError> {
        let non_blank = |field: &str, value: Option<String>| -> Result<Option<String>, AppError> {
            match value {
                Some(v) if v.trim().is_empty() => {
                    Err(AppError::BadRequest(format!("{} cannot be empty", field)))
                }
                Some(v) => Ok(Some(v.trim().to_string())),
                None => Ok(None),
            }
        };

        Ok(Self {
            first_name: non_blank("first_name", dto.first_name)?,
            last_name: non_blank("last_name", dto.last_name)?,
            phone: dto.phone.map(|p| p.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// A freshly issued bearer token together with its owner.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    /// Raw token, shown to the client once and never stored.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn into_dto(self) -> crate::model::auth::AuthResponseDto {
        crate::model::auth::AuthResponseDto {
            user: self.user.into_dto(),
            token: self.token,
            expires_at: self.expires_at,
        }
    }
}
