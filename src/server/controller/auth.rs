use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        auth::{AuthResponseDto, LoginDto, RegisterDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::AuthGuard,
        model::user::RegisterParams,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates a registered user and returns a bearer token. A guest account created by an
/// earlier anonymous booking with the same email is upgraded in place.
///
/// # Returns
/// - `201 Created` - Account created, token issued
/// - `400 Bad Request` - Missing fields or password shorter than 8 characters
/// - `409 Conflict` - Email already belongs to a registered account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    let session = AuthService::new(&state.db, state.token_ttl)
        .register(params)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - Credentials accepted, token issued
/// - `401 Unauthorized` - Unknown email, guest account or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, state.token_ttl)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Revoke the presented bearer token.
///
/// # Returns
/// - `204 No Content` - Token revoked
/// - `401 Unauthorized` - Missing, unknown or expired token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &headers);
    guard.require(&[]).await?;
    let token = guard.bearer_token()?.ok_or(AuthError::MissingToken)?;

    AuthService::new(&state.db, state.token_ttl)
        .logout(token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
