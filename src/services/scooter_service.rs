use crate::config::BookingConfig;
use crate::entities::{scooter_entity as scooters, shop_entity as shops};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::pricing::compute_booking_total;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct ScooterService {
    pool: DatabaseConnection,
    booking_config: BookingConfig,
}

impl ScooterService {
    pub fn new(pool: DatabaseConnection, booking_config: BookingConfig) -> Self {
        Self {
            pool,
            booking_config,
        }
    }

    pub async fn create_scooter(
        &self,
        user_id: i64,
        shop_id: i64,
        request: CreateScooterRequest,
    ) -> AppResult<ScooterResponse> {
        self.assert_shop_owner(user_id, shop_id).await?;
        validate_rate_card(request.daily_price, request.weekly_price, request.monthly_price)?;
        if request.deposit_amount < 0 {
            return Err(AppError::ValidationError(
                "Deposit must not be negative".to_string(),
            ));
        }

        let scooter = scooters::ActiveModel {
            shop_id: Set(shop_id),
            model: Set(request.model),
            description: Set(request.description),
            daily_price: Set(request.daily_price),
            weekly_price: Set(request.weekly_price),
            monthly_price: Set(request.monthly_price),
            deposit_amount: Set(request.deposit_amount),
            is_listed: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ScooterResponse::from(scooter))
    }

    pub async fn update_scooter(
        &self,
        user_id: i64,
        scooter_id: i64,
        request: UpdateScooterRequest,
    ) -> AppResult<ScooterResponse> {
        let scooter = self.find_owned_scooter(user_id, scooter_id).await?;

        let daily = request.daily_price.unwrap_or(scooter.daily_price);
        let weekly = request.weekly_price.unwrap_or(scooter.weekly_price);
        let monthly = request.monthly_price.unwrap_or(scooter.monthly_price);
        validate_rate_card(daily, weekly, monthly)?;

        let mut model = scooter.into_active_model();
        if let Some(name) = request.model {
            model.model = Set(name);
        }
        if request.description.is_some() {
            model.description = Set(request.description);
        }
        if let Some(price) = request.daily_price {
            model.daily_price = Set(price);
        }
        if let Some(price) = request.weekly_price {
            model.weekly_price = Set(price);
        }
        if let Some(price) = request.monthly_price {
            model.monthly_price = Set(price);
        }
        if let Some(deposit) = request.deposit_amount {
            if deposit < 0 {
                return Err(AppError::ValidationError(
                    "Deposit must not be negative".to_string(),
                ));
            }
            model.deposit_amount = Set(deposit);
        }
        if let Some(listed) = request.is_listed {
            model.is_listed = Set(listed);
        }

        let updated = model.update(&self.pool).await?;
        Ok(ScooterResponse::from(updated))
    }

    /// Fleet of a shop. Owners see everything, everyone else only listed
    /// scooters.
    pub async fn list_shop_scooters(
        &self,
        shop_id: i64,
        requesting_user: Option<i64>,
    ) -> AppResult<Vec<ScooterResponse>> {
        let shop = shops::Entity::find_by_id(shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;

        let mut filter = scooters::Entity::find().filter(scooters::Column::ShopId.eq(shop_id));
        if requesting_user != Some(shop.owner_id) {
            filter = filter.filter(scooters::Column::IsListed.eq(true));
        }

        let models = filter
            .order_by_asc(scooters::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(ScooterResponse::from).collect())
    }

    pub async fn get_scooter(&self, scooter_id: i64) -> AppResult<ScooterResponse> {
        let scooter = scooters::Entity::find_by_id(scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;
        Ok(ScooterResponse::from(scooter))
    }

    /// Price quote for a date range, without touching availability. The
    /// booking flow re-runs the same calculation when the request is made.
    pub async fn quote(
        &self,
        scooter_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<QuoteResponse> {
        if end_date < start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let scooter = scooters::Entity::find_by_id(scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;

        let days = (end_date - start_date).num_days() + 1;
        let quote = compute_booking_total(
            &scooter.rate_card(),
            scooter.deposit_amount,
            days,
            self.booking_config.fee_percent,
        );

        Ok(QuoteResponse {
            scooter_id,
            start_date,
            end_date,
            days,
            subtotal: quote.subtotal,
            deposit_amount: quote.deposit_amount,
            booking_fee: quote.booking_fee,
            total_price: quote.total_price,
            breakdown: quote.breakdown,
            price_per_day: quote.price_per_day,
        })
    }

    pub async fn find_owned_scooter(
        &self,
        user_id: i64,
        scooter_id: i64,
    ) -> AppResult<scooters::Model> {
        let scooter = scooters::Entity::find_by_id(scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;
        self.assert_shop_owner(user_id, scooter.shop_id).await?;
        Ok(scooter)
    }

    async fn assert_shop_owner(&self, user_id: i64, shop_id: i64) -> AppResult<()> {
        let shop = shops::Entity::find_by_id(shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;
        if shop.owner_id != user_id {
            return Err(AppError::PermissionDenied);
        }
        Ok(())
    }
}

fn validate_rate_card(daily: i64, weekly: Option<i64>, monthly: Option<i64>) -> AppResult<()> {
    if daily <= 0 {
        return Err(AppError::ValidationError(
            "Daily price must be positive".to_string(),
        ));
    }
    if weekly.is_some_and(|p| p <= 0) || monthly.is_some_and(|p| p <= 0) {
        return Err(AppError::ValidationError(
            "Tier prices must be positive".to_string(),
        ));
    }
    Ok(())
}
