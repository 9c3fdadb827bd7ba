use crate::server::{data::auth_token::AuthTokenRepository, error::AppError};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_user_by_valid_hash;
