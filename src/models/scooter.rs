use crate::entities::scooter_entity;
use crate::pricing::RateCard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateScooterRequest {
    pub model: String,
    pub description: Option<String>,
    pub daily_price: i64,
    pub weekly_price: Option<i64>,
    pub monthly_price: Option<i64>,
    pub deposit_amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateScooterRequest {
    pub model: Option<String>,
    pub description: Option<String>,
    pub daily_price: Option<i64>,
    pub weekly_price: Option<Option<i64>>,
    pub monthly_price: Option<Option<i64>>,
    pub deposit_amount: Option<i64>,
    pub is_listed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScooterResponse {
    pub id: i64,
    pub shop_id: i64,
    pub model: String,
    pub description: Option<String>,
    pub daily_price: i64,
    pub weekly_price: Option<i64>,
    pub monthly_price: Option<i64>,
    pub deposit_amount: i64,
    pub is_listed: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub scooter_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub subtotal: i64,
    pub deposit_amount: i64,
    pub booking_fee: i64,
    pub total_price: i64,
    pub breakdown: String,
    pub price_per_day: i64,
}

impl From<scooter_entity::Model> for ScooterResponse {
    fn from(m: scooter_entity::Model) -> Self {
        Self {
            id: m.id,
            shop_id: m.shop_id,
            model: m.model,
            description: m.description,
            daily_price: m.daily_price,
            weekly_price: m.weekly_price,
            monthly_price: m.monthly_price,
            deposit_amount: m.deposit_amount,
            is_listed: m.is_listed,
        }
    }
}

impl scooter_entity::Model {
    pub fn rate_card(&self) -> RateCard {
        RateCard {
            daily_price: self.daily_price,
            weekly_price: self.weekly_price,
            monthly_price: self.monthly_price,
        }
    }
}
