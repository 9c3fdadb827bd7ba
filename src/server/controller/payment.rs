use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        payment::{CreatePaymentDto, PaginatedPaymentsDto, PaymentDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::payment::CreatePaymentParams,
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

/// Record a payment for a reservation.
///
/// A `SUCCESS` payment must match the reservation total and confirms the reservation.
/// `FAILED` and `PENDING` payments are only recorded. Anonymous callers may pay for
/// guest bookings.
///
/// # Returns
/// - `201 Created` - Payment recorded
/// - `400 Bad Request` - Unknown status, or amount differs from the total
/// - `404 Not Found` - Reservation missing or not visible to the caller
/// - `409 Conflict` - Successful payment for a reservation that is not pending
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentDto),
        (status = 400, description = "Invalid payment", body = ErrorDto),
        (status = 401, description = "Invalid bearer token", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Reservation is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &headers).optional().await?;

    let params = CreatePaymentParams::from_dto(payload)?;

    let payment = PaymentService::new(&state.db)
        .create(params, caller.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto())))
}

/// Get a payment by ID.
///
/// # Access Control
/// - Owner of the paid reservation or an admin; others receive 404
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = PaymentDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let payment = PaymentService::new(&state.db).get_visible(id, &user).await?;

    Ok((StatusCode::OK, Json(payment.into_dto())))
}

/// Get a page of all payments, newest first.
///
/// # Access Control
/// - `Admin` - Only admins can list every payment
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of payments", body = PaginatedPaymentsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let payments = PaymentService::new(&state.db)
        .list(params.page, params.per_page())
        .await?;

    Ok((StatusCode::OK, Json(payments.into_dto())))
}
