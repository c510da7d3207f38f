use crate::models::*;
use crate::services::{AvailabilityService, BookingService, ScooterService, ShopService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    post,
    path = "/shops",
    tag = "shop",
    request_body = CreateShopRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shop created", body = ShopResponse),
        (status = 403, description = "Only owners can create shops")
    )
)]
pub async fn create_shop(
    shop_service: web::Data<ShopService>,
    req: HttpRequest,
    request: web::Json<CreateShopRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match shop_service.create_shop(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/shops",
    tag = "shop",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("city" = Option<String>, Query, description = "Filter by city")
    ),
    responses(
        (status = 200, description = "Shop list")
    )
)]
pub async fn list_shops(
    shop_service: web::Data<ShopService>,
    query: web::Query<ShopQuery>,
) -> Result<HttpResponse> {
    match shop_service.list_shops(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/shops/{id}",
    tag = "shop",
    params(("id" = i64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shop details", body = ShopResponse),
        (status = 404, description = "Shop not found")
    )
)]
pub async fn get_shop(
    shop_service: web::Data<ShopService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match shop_service.get_shop(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/shops/{id}",
    tag = "shop",
    request_body = UpdateShopRequest,
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shop updated", body = ShopResponse),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn update_shop(
    shop_service: web::Data<ShopService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateShopRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match shop_service
        .update_shop(user_id, path.into_inner(), request.into_inner())
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
    post,
    path = "/shops/{id}/scooters",
    tag = "scooter",
    request_body = CreateScooterRequest,
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Scooter added", body = ScooterResponse),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn create_scooter(
    scooter_service: web::Data<ScooterService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CreateScooterRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match scooter_service
        .create_scooter(user_id, path.into_inner(), request.into_inner())
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
    path = "/shops/{id}/scooters",
    tag = "scooter",
    params(("id" = i64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Fleet of the shop"),
        (status = 404, description = "Shop not found")
    )
)]
pub async fn list_shop_scooters(
    scooter_service: web::Data<ScooterService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req);

    match scooter_service
        .list_shop_scooters(path.into_inner(), user_id)
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
    path = "/shops/{id}/bookings",
    tag = "booking",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Shop id"),
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("status" = Option<BookingStatus>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Bookings across the shop's fleet"),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn list_shop_bookings(
    booking_service: web::Data<BookingService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<BookingQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match booking_service
        .list_shop_bookings(user_id, path.into_inner(), &query)
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
    path = "/shops/{id}/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Shop id"),
        ("start_date" = String, Query, description = "First day (inclusive, ISO date)"),
        ("end_date" = String, Query, description = "Last day (inclusive, ISO date)")
    ),
    responses(
        (status = 200, description = "Day-by-scooter grid", body = ShopAvailabilityResponse),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn get_shop_availability(
    availability_service: web::Data<AvailabilityService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match availability_service
        .get_shop_grid(user_id, path.into_inner(), &query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn shop_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shops")
            .route("", web::post().to(create_shop))
            .route("", web::get().to(list_shops))
            .route("/{id}", web::get().to(get_shop))
            .route("/{id}", web::put().to(update_shop))
            .route("/{id}/scooters", web::post().to(create_scooter))
            .route("/{id}/scooters", web::get().to(list_shop_scooters))
            .route("/{id}/bookings", web::get().to(list_shop_bookings))
            .route("/{id}/availability", web::get().to(get_shop_availability)),
    );
}
