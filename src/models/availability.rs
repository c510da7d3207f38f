use crate::availability::DayAvailability;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetOverrideRequest {
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScooterCalendarResponse {
    pub scooter_id: i64,
    pub days: Vec<DayAvailability>,
}

/// Fleet-wide grid for the owner calendar view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopAvailabilityResponse {
    pub shop_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scooters: Vec<ScooterCalendarResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OverrideResponse {
    pub scooter_id: i64,
    pub day: NaiveDate,
    pub is_available: bool,
}
