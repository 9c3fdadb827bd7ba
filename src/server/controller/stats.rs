use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        stats::{ReservationStatsDto, RevenueDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::stats::StatsService,
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static STATS_TAG: &str = "stats";

/// Get total revenue of paid reservations.
///
/// # Access Control
/// - `Admin` - Only admins can view statistics
#[utoipa::path(
    get,
    path = "/api/stats/revenue",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Total revenue", body = RevenueDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_revenue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let total_cents = StatsService::new(&state.db).revenue().await?;

    Ok((StatusCode::OK, Json(RevenueDto { total_cents })))
}

/// Get reservation counts per status.
///
/// # Access Control
/// - `Admin` - Only admins can view statistics
#[utoipa::path(
    get,
    path = "/api/stats/reservations",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Reservation counts", body = ReservationStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reservation_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let stats = StatsService::new(&state.db).reservations().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}
