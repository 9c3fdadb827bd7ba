use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check `.env.example` for the required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed into the expected type.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the variable
        name: String,
        /// The raw value that failed to parse
        value: String,
    },

    /// Numeric environment variable parsed but falls outside its accepted range.
    #[error("Value {value} for environment variable {name} must be between {min} and {max}")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Rate limiter settings were rejected by the governor builder.
    #[error("Invalid rate limit configuration: per_second={per_second}, burst={burst}")]
    InvalidRateLimit { per_second: u64, burst: u32 },
}
