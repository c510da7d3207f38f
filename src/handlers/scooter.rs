use crate::models::*;
use crate::services::{AvailabilityService, ScooterService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::NaiveDate;
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/scooters/{id}",
    tag = "scooter",
    params(("id" = i64, Path, description = "Scooter id")),
    responses(
        (status = 200, description = "Scooter details", body = ScooterResponse),
        (status = 404, description = "Scooter not found")
    )
)]
pub async fn get_scooter(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match scooter_service.get_scooter(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/scooters/{id}",
    tag = "scooter",
    request_body = UpdateScooterRequest,
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Scooter id")),
    responses(
        (status = 200, description = "Scooter updated", body = ScooterResponse),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn update_scooter(
    scooter_service: web::Data<ScooterService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateScooterRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match scooter_service
        .update_scooter(user_id, path.into_inner(), request.into_inner())
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
    path = "/scooters/{id}/quote",
    tag = "scooter",
    params(
        ("id" = i64, Path, description = "Scooter id"),
        ("start_date" = String, Query, description = "First rental day (inclusive, ISO date)"),
        ("end_date" = String, Query, description = "Last rental day (inclusive, ISO date)")
    ),
    responses(
        (status = 200, description = "Price quote for the range", body = QuoteResponse),
        (status = 404, description = "Scooter not found")
    )
)]
pub async fn get_quote(
    scooter_service: web::Data<ScooterService>,
    path: web::Path<i64>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse> {
    match scooter_service
        .quote(path.into_inner(), query.start_date, query.end_date)
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
    path = "/scooters/{id}/availability",
    tag = "availability",
    params(
        ("id" = i64, Path, description = "Scooter id"),
        ("start_date" = String, Query, description = "First day (inclusive, ISO date)"),
        ("end_date" = String, Query, description = "Last day (inclusive, ISO date)")
    ),
    responses(
        (status = 200, description = "Per-day availability", body = ScooterCalendarResponse),
        (status = 404, description = "Scooter not found")
    )
)]
pub async fn get_scooter_availability(
    availability_service: web::Data<AvailabilityService>,
    path: web::Path<i64>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse> {
    match availability_service
        .get_scooter_calendar(path.into_inner(), &query)
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
    put,
    path = "/scooters/{id}/availability/{day}",
    tag = "availability",
    request_body = SetOverrideRequest,
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Scooter id"),
        ("day" = String, Path, description = "Calendar day (ISO date)")
    ),
    responses(
        (status = 200, description = "Override stored", body = OverrideResponse),
        (status = 403, description = "Not the shop owner")
    )
)]
pub async fn set_availability_override(
    availability_service: web::Data<AvailabilityService>,
    req: HttpRequest,
    path: web::Path<(i64, NaiveDate)>,
    request: web::Json<SetOverrideRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    let (scooter_id, day) = path.into_inner();

    match availability_service
        .set_override(user_id, scooter_id, day, request.is_available)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn scooter_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scooters")
            .route("/{id}", web::get().to(get_scooter))
            .route("/{id}", web::put().to(update_scooter))
            .route("/{id}/quote", web::get().to(get_quote))
            .route("/{id}/availability", web::get().to(get_scooter_availability))
            .route(
                "/{id}/availability/{day}",
                web::put().to(set_availability_override),
            ),
    );
}
