use crate::entities::{UserRole, shop_entity as shops, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ShopService {
    pool: DatabaseConnection,
}

impl ShopService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_shop(&self, user_id: i64, request: CreateShopRequest) -> AppResult<ShopResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if user.role != UserRole::Owner {
            return Err(AppError::PermissionDenied);
        }
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Shop name must not be empty".to_string()));
        }

        let shop = shops::ActiveModel {
            owner_id: Set(user_id),
            name: Set(request.name),
            city: Set(request.city),
            description: Set(request.description),
            phone: Set(request.phone),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ShopResponse::from(shop))
    }

    pub async fn list_shops(&self, query: &ShopQuery) -> AppResult<PaginatedResponse<ShopResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut filter = shops::Entity::find();
        if let Some(city) = &query.city {
            filter = filter.filter(shops::Column::City.eq(city.clone()));
        }

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct CountRow {
            count: i64,
        }
        let total = filter
            .clone()
            .select_only()
            .column_as(Expr::val(1).count(), "count")
            .into_model::<CountRow>()
            .one(&self.pool)
            .await?
            .map(|r| r.count)
            .unwrap_or(0);

        let models = filter
            .order_by_asc(shops::Column::Name)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<ShopResponse> = models.into_iter().map(ShopResponse::from).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_shop(&self, shop_id: i64) -> AppResult<ShopResponse> {
        let shop = shops::Entity::find_by_id(shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;
        Ok(ShopResponse::from(shop))
    }

    pub async fn update_shop(
        &self,
        user_id: i64,
        shop_id: i64,
        request: UpdateShopRequest,
    ) -> AppResult<ShopResponse> {
        let shop = self.find_owned_shop(user_id, shop_id).await?;

        let mut model = shop.into_active_model();
        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError("Shop name must not be empty".to_string()));
            }
            model.name = Set(name);
        }
        if let Some(city) = request.city {
            model.city = Set(city);
        }
        if request.description.is_some() {
            model.description = Set(request.description);
        }
        if request.phone.is_some() {
            model.phone = Set(request.phone);
        }

        let updated = model.update(&self.pool).await?;
        Ok(ShopResponse::from(updated))
    }

    /// Loads the shop and verifies the caller owns it.
    pub async fn find_owned_shop(&self, user_id: i64, shop_id: i64) -> AppResult<shops::Model> {
        let shop = shops::Entity::find_by_id(shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;
        if shop.owner_id != user_id {
            return Err(AppError::PermissionDenied);
        }
        Ok(shop)
    }
}
