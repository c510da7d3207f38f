use crate::entities::shop_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    pub name: String,
    pub city: String,
    pub description: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShopResponse {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub city: String,
    pub description: Option<String>,
    pub phone: Option<String>,
}

impl From<shop_entity::Model> for ShopResponse {
    fn from(m: shop_entity::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            city: m.city,
            description: m.description,
            phone: m.phone,
        }
    }
}
