use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::availability::DayAvailability;
use crate::handlers;
use crate::models::*;
use crate::pricing::{BookingQuote, RateCard, RentalQuote};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::shop::create_shop,
        handlers::shop::list_shops,
        handlers::shop::get_shop,
        handlers::shop::update_shop,
        handlers::shop::create_scooter,
        handlers::shop::list_shop_scooters,
        handlers::shop::list_shop_bookings,
        handlers::shop::get_shop_availability,
        handlers::scooter::get_scooter,
        handlers::scooter::update_scooter,
        handlers::scooter::get_quote,
        handlers::scooter::get_scooter_availability,
        handlers::scooter::set_availability_override,
        handlers::booking::create_booking,
        handlers::booking::list_my_bookings,
        handlers::booking::update_booking_status,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            UserRole,
            CreateShopRequest,
            UpdateShopRequest,
            ShopResponse,
            CreateScooterRequest,
            UpdateScooterRequest,
            ScooterResponse,
            QuoteResponse,
            RateCard,
            RentalQuote,
            BookingQuote,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            BookingResponse,
            BookingStatus,
            AvailabilityQuery,
            SetOverrideRequest,
            DayAvailability,
            ScooterCalendarResponse,
            ShopAvailabilityResponse,
            OverrideResponse,
            ApiError,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "shop", description = "Shop management API"),
        (name = "scooter", description = "Fleet management API"),
        (name = "availability", description = "Availability calendar API"),
        (name = "booking", description = "Booking API"),
    ),
    info(
        title = "ScootRent Backend API",
        version = "1.0.0",
        description = "Scooter rental marketplace REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
