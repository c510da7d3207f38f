use actix_cors::Cors;
use actix_web::http::header;

pub fn create_cors() -> Cors {
    // tighten allowed_origin_fn to the real frontend origins in production
    Cors::default()
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(600)
}
