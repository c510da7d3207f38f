use crate::models::*;
use crate::services::BookingService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "booking",
    request_body = CreateBookingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking requested", body = BookingResponse),
        (status = 400, description = "Invalid date range"),
        (status = 409, description = "Scooter not available for the requested dates")
    )
)]
pub async fn create_booking(
    booking_service: web::Data<BookingService>,
    req: HttpRequest,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match booking_service
        .create_booking(user_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "booking",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("status" = Option<BookingStatus>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "The caller's bookings")
    )
)]
pub async fn list_my_bookings(
    booking_service: web::Data<BookingService>,
    req: HttpRequest,
    query: web::Query<BookingQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match booking_service.list_renter_bookings(user_id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/bookings/{id}/status",
    tag = "booking",
    request_body = UpdateBookingStatusRequest,
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 403, description = "Not a party to this booking"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_booking_status(
    booking_service: web::Data<BookingService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateBookingStatusRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match booking_service
        .update_status(user_id, path.into_inner(), request.status)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn booking_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_my_bookings))
            .route("/{id}/status", web::post().to(update_booking_status)),
    );
}
