use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        car::{
            AvailabilityDto, AvailabilityQuery, CarDto, CarInputDto, CarSearchQuery,
            PaginatedCarsDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            availability::DateRange,
            car::{Car, CarParams, CarSearchParams, DEFAULT_CARS_PER_PAGE},
        },
        service::car::CarService,
        state::AppState,
        util::pagination::clamp_per_page,
    },
};

/// Tag for grouping car catalog endpoints in OpenAPI documentation
pub static CAR_TAG: &str = "car";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarListQuery {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 12, max: 100)
    pub per_page: Option<u64>,
    /// Only list cars of this agency
    pub agency: Option<String>,
}

/// Get a page of the catalog.
///
/// # Returns
/// - `200 OK` - Cars ordered by brand, model and id
#[utoipa::path(
    get,
    path = "/api/cars",
    tag = CAR_TAG,
    params(CarListQuery),
    responses(
        (status = 200, description = "Page of cars", body = PaginatedCarsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let per_page = clamp_per_page(query.per_page.unwrap_or(DEFAULT_CARS_PER_PAGE));
    let agency = query.agency.as_deref().filter(|a| !a.is_empty());

    let cars = CarService::new(&state.db)
        .list(agency, query.page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(cars.into_dto())))
}

/// Get a car by ID.
///
/// # Returns
/// - `200 OK` - Car details
/// - `404 Not Found` - No car with this ID
#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car details", body = CarDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let car = CarService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(car.into_dto())))
}

/// Get every car of an agency.
#[utoipa::path(
    get,
    path = "/api/cars/agency/{agency}",
    tag = CAR_TAG,
    params(("agency" = String, Path, description = "Agency name")),
    responses(
        (status = 200, description = "Cars of the agency", body = Vec<CarDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cars_by_agency(
    State(state): State<AppState>,
    Path(agency): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cars = CarService::new(&state.db).by_agency(&agency).await?;

    let cars_dto: Vec<CarDto> = cars.into_iter().map(Car::into_dto).collect();

    Ok((StatusCode::OK, Json(cars_dto)))
}

/// Search the catalog.
///
/// All filters are conjunctive. When both dates are given, only cars without an
/// overlapping active reservation are returned and cars in maintenance are excluded.
///
/// # Returns
/// - `200 OK` - Matching cars
/// - `400 Bad Request` - End date before start date, or unknown status
#[utoipa::path(
    get,
    path = "/api/cars/search",
    tag = CAR_TAG,
    params(CarSearchQuery),
    responses(
        (status = 200, description = "Matching cars", body = PaginatedCarsDto),
        (status = 400, description = "Invalid search filters", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_cars(
    State(state): State<AppState>,
    Query(query): Query<CarSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = CarSearchParams::from_query(query)?;

    let cars = CarService::new(&state.db).search(params).await?;

    Ok((StatusCode::OK, Json(cars.into_dto())))
}

/// Check whether a car can be booked for a date range.
///
/// # Returns
/// - `200 OK` - `{available}` with a `message` when the car cannot be booked
/// - `400 Bad Request` - End date before start date
/// - `404 Not Found` - No car with this ID
#[utoipa::path(
    get,
    path = "/api/cars/{id}/availability",
    tag = CAR_TAG,
    params(("id" = i32, Path, description = "Car ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Availability of the car", body = AvailabilityDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = DateRange::new(query.start_date, query.end_date)?;

    let availability = CarService::new(&state.db).availability(id, range).await?;

    Ok((StatusCode::OK, Json(availability.into_dto())))
}

/// Get the distinct car types, sorted.
#[utoipa::path(
    get,
    path = "/api/cars/types",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Car types", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_car_types(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let types = CarService::new(&state.db).types().await?;

    Ok((StatusCode::OK, Json(types)))
}

/// Get the distinct agencies, sorted.
#[utoipa::path(
    get,
    path = "/api/cars/agencies",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "Agencies", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_agencies(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let agencies = CarService::new(&state.db).agencies().await?;

    Ok((StatusCode::OK, Json(agencies)))
}

/// Add a car to the catalog.
///
/// # Access Control
/// - `Admin` - Only admins can manage the catalog
///
/// # Returns
/// - `201 Created` - Car created
/// - `400 Bad Request` - Invalid car data
/// - `401 Unauthorized` / `403 Forbidden` - Not authenticated or not an admin
/// - `409 Conflict` - Registration number already used
#[utoipa::path(
    post,
    path = "/api/cars",
    tag = CAR_TAG,
    request_body = CarInputDto,
    responses(
        (status = 201, description = "Car created", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Duplicate registration number", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CarInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CarParams::from_dto(payload)?;

    let car = CarService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(car.into_dto())))
}

/// Replace a car's details.
///
/// # Access Control
/// - `Admin` - Only admins can manage the catalog
///
/// # Returns
/// - `200 OK` - Updated car
/// - `404 Not Found` - No car with this ID
/// - `409 Conflict` - Registration number already used by another car
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(("id" = i32, Path, description = "Car ID")),
    request_body = CarInputDto,
    responses(
        (status = 200, description = "Car updated", body = CarDto),
        (status = 400, description = "Invalid car data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 409, description = "Duplicate registration number", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<CarInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CarParams::from_dto(payload)?;

    let car = CarService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(car.into_dto())))
}

/// Remove a car from the catalog.
///
/// # Access Control
/// - `Admin` - Only admins can manage the catalog
///
/// # Returns
/// - `204 No Content` - Car deleted
/// - `404 Not Found` - No car with this ID
/// - `409 Conflict` - Car has pending or confirmed reservations
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = CAR_TAG,
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Car not found", body = ErrorDto),
        (status = 409, description = "Car has active reservations", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&[Permission::Admin])
        .await?;

    CarService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
