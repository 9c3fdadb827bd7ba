use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::model::availability::ReservationStatus,
};

/// Violations of the booking rules.
#[derive(Error, Debug)]
pub enum ReservationError {
    /// The car cannot be booked for the requested range.
    ///
    /// Carries the client-facing reason (maintenance or an overlapping booking).
    /// Results in 409 Conflict.
    #[error("{0}")]
    CarUnavailable(String),

    /// The requested status change is not allowed from the current status.
    ///
    /// Results in 409 Conflict.
    #[error("Cannot change reservation {id} from {from} to {to}")]
    InvalidTransition {
        id: i32,
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// PATCH asked for a status other than cancelled or completed.
    ///
    /// Results in 400 Bad Request.
    #[error("Unsupported update")]
    UnsupportedUpdate,
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::CarUnavailable(_) | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::UnsupportedUpdate => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
