use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::ErrorDto,
        auth::{AuthResponseDto, LoginDto, RegisterDto},
        car::{AvailabilityDto, CarDto, CarInputDto, PaginatedCarsDto},
        invoice::InvoiceDto,
        payment::{CreatePaymentDto, PaginatedPaymentsDto, PaymentDto},
        reservation::{
            CreateReservationDto, GuestDetailsDto, PaginatedReservationsDto, ReservationDto,
            UpdateReservationStatusDto,
        },
        stats::{ReservationStatsDto, RevenueDto},
        user::{PaginatedUsersDto, UpdateProfileDto, UserDto},
    },
    server::{
        controller::{auth, car, payment, reservation, stats, user},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "CarRentalConnect API"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        car::list_cars,
        car::get_car,
        car::get_cars_by_agency,
        car::search_cars,
        car::get_car_availability,
        car::get_car_types,
        car::get_agencies,
        car::create_car,
        car::update_car,
        car::delete_car,
        reservation::create_reservation,
        reservation::get_reservation,
        reservation::get_my_reservations,
        reservation::get_reservations,
        reservation::update_reservation,
        reservation::get_reservation_invoice,
        reservation::get_reservation_payments,
        payment::create_payment,
        payment::get_payment,
        payment::get_payments,
        user::get_me,
        user::update_me,
        user::get_users,
        user::grant_admin,
        user::revoke_admin,
        stats::get_revenue,
        stats::get_reservation_stats,
    ),
    components(schemas(
        ErrorDto,
        RegisterDto,
        LoginDto,
        AuthResponseDto,
        CarDto,
        CarInputDto,
        PaginatedCarsDto,
        AvailabilityDto,
        ReservationDto,
        GuestDetailsDto,
        CreateReservationDto,
        UpdateReservationStatusDto,
        PaginatedReservationsDto,
        InvoiceDto,
        PaymentDto,
        CreatePaymentDto,
        PaginatedPaymentsDto,
        UserDto,
        UpdateProfileDto,
        PaginatedUsersDto,
        RevenueDto,
        ReservationStatsDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and bearer tokens"),
        (name = "car", description = "Car catalog and availability"),
        (name = "reservation", description = "Bookings and their lifecycle"),
        (name = "payment", description = "Payments against reservations"),
        (name = "user", description = "Profiles and roles"),
        (name = "stats", description = "Admin dashboard figures"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/cars", get(car::list_cars).post(car::create_car))
        .route("/api/cars/search", get(car::search_cars))
        .route("/api/cars/types", get(car::get_car_types))
        .route("/api/cars/agencies", get(car::get_agencies))
        .route("/api/cars/agency/{agency}", get(car::get_cars_by_agency))
        .route(
            "/api/cars/{id}",
            get(car::get_car).put(car::update_car).delete(car::delete_car),
        )
        .route(
            "/api/cars/{id}/availability",
            get(car::get_car_availability),
        )
        .route(
            "/api/reservations",
            get(reservation::get_reservations).post(reservation::create_reservation),
        )
        .route("/api/reservations/my", get(reservation::get_my_reservations))
        .route(
            "/api/reservations/{id}",
            get(reservation::get_reservation).patch(reservation::update_reservation),
        )
        .route(
            "/api/reservations/{id}/invoice",
            get(reservation::get_reservation_invoice),
        )
        .route(
            "/api/reservations/{id}/payments",
            get(reservation::get_reservation_payments),
        )
        .route(
            "/api/payments",
            get(payment::get_payments).post(payment::create_payment),
        )
        .route("/api/payments/{id}", get(payment::get_payment))
        .route("/api/users", get(user::get_users))
        .route("/api/users/me", get(user::get_me).patch(user::update_me))
        .route(
            "/api/users/{id}/admin",
            put(user::grant_admin).delete(user::revoke_admin),
        )
        .route("/api/stats/revenue", get(stats::get_revenue))
        .route("/api/stats/reservations", get(stats::get_reservation_stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
