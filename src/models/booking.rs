pub use crate::entities::BookingStatus;

use crate::entities::booking_entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub scooter_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub scooter_id: i64,
    pub renter_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub subtotal: i64,
    pub deposit_amount: i64,
    pub booking_fee: i64,
    pub total_price: i64,
    pub price_breakdown: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<booking_entity::Model> for BookingResponse {
    fn from(m: booking_entity::Model) -> Self {
        Self {
            id: m.id,
            scooter_id: m.scooter_id,
            renter_id: m.renter_id,
            start_date: m.start_date,
            end_date: m.end_date,
            status: m.status,
            subtotal: m.subtotal,
            deposit_amount: m.deposit_amount,
            booking_fee: m.booking_fee,
            total_price: m.total_price,
            price_breakdown: m.price_breakdown,
            created_at: m.created_at,
        }
    }
}
