use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        invoice::InvoiceDto,
        payment::PaymentDto,
        reservation::{
            CreateReservationDto, PaginatedReservationsDto, ReservationDto,
            UpdateReservationStatusDto,
        },
    },
    server::{
        error::{reservation::ReservationError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            availability::ReservationStatus,
            payment::Payment,
            reservation::{CreateReservationParams, ReservationScope, ReservationUpdate},
        },
        service::{
            invoice::InvoiceService, payment::PaymentService, reservation::ReservationService,
        },
        state::AppState,
        util::pagination::clamp_per_page,
    },
};

/// Tag for grouping reservation endpoints in OpenAPI documentation
pub static RESERVATION_TAG: &str = "reservation";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationListQuery {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10, max: 100)
    pub per_page: Option<u64>,
    /// Only list reservations in this status
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyReservationsQuery {
    /// `active` (pending or confirmed) or `past` (completed or cancelled)
    pub scope: Option<String>,
}

/// Book a car.
///
/// Authenticated callers book for themselves. Anonymous callers must send guest
/// details; a guest account is found or created for their email.
///
/// # Returns
/// - `201 Created` - PENDING reservation with its quoted total
/// - `400 Bad Request` - Invalid dates, missing guest details, or an email that belongs
///   to a registered account
/// - `401 Unauthorized` - A bearer token was sent but is invalid
/// - `404 Not Found` - No car with this ID
/// - `409 Conflict` - Car in maintenance or already reserved for overlapping dates
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    request_body = CreateReservationDto,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDto),
        (status = 400, description = "Invalid reservation data", body = ErrorDto),
        (status = 401, description = "Invalid bearer token", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 409, description = "Car not available for the dates", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateReservationDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &headers).optional().await?;

    let params = CreateReservationParams::from_dto(
        payload,
        caller.map(|user| user.id),
        Utc::now().date_naive(),
    )?;

    let reservation = ReservationService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(reservation.into_dto())))
}

/// Get a reservation with its car.
///
/// # Access Control
/// - Owner of the reservation or an admin; others receive 404
#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let (reservation, car) = ReservationService::new(&state.db)
        .get_with_car(id, &user)
        .await?;

    Ok((StatusCode::OK, Json(reservation.into_dto_with_car(car))))
}

/// Get the caller's reservations, newest first.
#[utoipa::path(
    get,
    path = "/api/reservations/my",
    tag = RESERVATION_TAG,
    params(MyReservationsQuery),
    responses(
        (status = 200, description = "Caller's reservations", body = Vec<ReservationDto>),
        (status = 400, description = "Unknown scope", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_reservations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MyReservationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let scope = ReservationScope::parse(query.scope.as_deref())?;

    let reservations = ReservationService::new(&state.db)
        .my(user.id, scope)
        .await?;

    let reservations_dto: Vec<ReservationDto> = reservations
        .into_iter()
        .map(|(reservation, car)| reservation.into_dto_with_car(car))
        .collect();

    Ok((StatusCode::OK, Json(reservations_dto)))
}

/// Get a page of all reservations.
///
/// # Access Control
/// - `Admin` - Only admins can list every reservation
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    params(ReservationListQuery),
    responses(
        (status = 200, description = "Page of reservations", body = PaginatedReservationsDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reservations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReservationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|raw| {
            raw.parse::<ReservationStatus>()
                .map_err(|_| AppError::BadRequest(format!("Unknown reservation status '{}'", raw)))
        })
        .transpose()?;

    let reservations = ReservationService::new(&state.db)
        .list(
            status,
            query.page,
            clamp_per_page(query.per_page.unwrap_or(10)),
        )
        .await?;

    Ok((StatusCode::OK, Json(reservations.into_dto())))
}

/// Cancel or complete a reservation.
///
/// # Access Control
/// - `cancelled` - Owner of the reservation or an admin
/// - `completed` - Admin only
///
/// # Returns
/// - `200 OK` - Updated reservation
/// - `400 Bad Request` - Any status other than `cancelled` or `completed`
/// - `404 Not Found` - Reservation missing or not visible to the caller
/// - `409 Conflict` - The reservation cannot move to the requested status
#[utoipa::path(
    patch,
    path = "/api/reservations/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationStatusDto,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationDto),
        (status = 400, description = "Unsupported update", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Only admins can complete reservations", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Illegal status transition", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReservationStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let update =
        ReservationUpdate::parse(&payload.status).ok_or(ReservationError::UnsupportedUpdate)?;

    let reservation = ReservationService::new(&state.db)
        .update(id, &user, update)
        .await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Get the invoice of a reservation.
///
/// # Access Control
/// - Owner of the reservation or an admin; others receive 404
#[utoipa::path(
    get,
    path = "/api/reservations/{id}/invoice",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Invoice", body = InvoiceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reservation_invoice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let invoice = InvoiceService::new(&state.db).get_for(id, &user).await?;

    Ok((StatusCode::OK, Json(invoice.into_dto())))
}

/// Get the payments of a reservation, oldest first.
///
/// # Access Control
/// - Owner of the reservation or an admin; others receive 404
#[utoipa::path(
    get,
    path = "/api/reservations/{id}/payments",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Payments of the reservation", body = Vec<PaymentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reservation_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &headers).require(&[]).await?;

    let payments = PaymentService::new(&state.db)
        .by_reservation(id, &user)
        .await?;

    let payments_dto: Vec<PaymentDto> = payments.into_iter().map(Payment::into_dto).collect();

    Ok((StatusCode::OK, Json(payments_dto)))
}
