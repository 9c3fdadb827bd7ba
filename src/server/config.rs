use std::{net::SocketAddr, ops::RangeInclusive, str::FromStr};

use chrono::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAIL_FROM: &str = "CarRentalConnect <no-reply@carrentalconnect.local>";

/// Accepted bearer token lifetimes, one hour up to one year.
const TOKEN_TTL_HOURS: RangeInclusive<i64> = 1..=8_760;
/// Accepted pending holds, disabled up to thirty days.
const PENDING_HOLD_MINUTES: RangeInclusive<i64> = 0..=43_200;

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,

    /// Lifetime of bearer tokens issued at login and registration.
    pub token_ttl: Duration,
    /// How long an unpaid reservation holds its car. Zero disables expiry.
    pub pending_hold: Duration,

    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    pub mail_from: String,

    /// Credentials for bootstrapping the first admin account.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let ttl_hours = parse_bounded("TOKEN_TTL_HOURS", "24", TOKEN_TTL_HOURS)?;
        let hold_minutes = parse_bounded("PENDING_HOLD_MINUTES", "1440", PENDING_HOLD_MINUTES)?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: parse_var("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            token_ttl: duration("TOKEN_TTL_HOURS", ttl_hours, Duration::try_hours)?,
            pending_hold: duration("PENDING_HOLD_MINUTES", hold_minutes, Duration::try_minutes)?,
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND", "2")?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", "20")?,
            mail_from: std::env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string()),
            admin_email: non_empty_var("ADMIN_EMAIL"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
        })
    }
}

/// Reads an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T, ConfigError> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());

    value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

/// Reads an optional integer variable that must fall inside `range`.
fn parse_bounded(
    name: &str,
    default: &str,
    range: RangeInclusive<i64>,
) -> Result<i64, ConfigError> {
    let value: i64 = parse_var(name, default)?;
    if !range.contains(&value) {
        return Err(ConfigError::OutOfRange {
            name: name.to_string(),
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }

    Ok(value)
}

fn duration(
    name: &str,
    amount: i64,
    build: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    build(amount).ok_or_else(|| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: amount.to_string(),
    })
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
