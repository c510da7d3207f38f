use crate::availability::availability_map;
use crate::entities::{
    availability_override_entity as overrides, scooter_entity as scooters, shop_entity as shops,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::BookingService;
use chrono::NaiveDate;
use sea_orm::sea_query::{Keyword, OnConflict, PostgresQueryBuilder, Query, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter};

// Calendar queries are capped so a bad date range cannot ask for years of
// cells in one request.
const MAX_CALENDAR_DAYS: i64 = 366;

#[derive(Clone)]
pub struct AvailabilityService {
    pool: DatabaseConnection,
    booking_service: BookingService,
}

impl AvailabilityService {
    pub fn new(pool: DatabaseConnection, booking_service: BookingService) -> Self {
        Self {
            pool,
            booking_service,
        }
    }

    /// Public per-scooter calendar over an inclusive date range.
    pub async fn get_scooter_calendar(
        &self,
        scooter_id: i64,
        query: &AvailabilityQuery,
    ) -> AppResult<ScooterCalendarResponse> {
        validate_calendar_range(query.start_date, query.end_date)?;

        let scooter = scooters::Entity::find_by_id(scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;

        let (spans, day_overrides) = self
            .booking_service
            .load_conflict_inputs(&[scooter.id])
            .await?;
        let mut map = availability_map(
            &[scooter.id],
            query.start_date,
            query.end_date,
            &spans,
            &day_overrides,
        );

        Ok(ScooterCalendarResponse {
            scooter_id: scooter.id,
            days: map.remove(&scooter.id).unwrap_or_default(),
        })
    }

    /// Owner grid across the whole fleet of a shop.
    pub async fn get_shop_grid(
        &self,
        user_id: i64,
        shop_id: i64,
        query: &AvailabilityQuery,
    ) -> AppResult<ShopAvailabilityResponse> {
        validate_calendar_range(query.start_date, query.end_date)?;

        let shop = shops::Entity::find_by_id(shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;
        if shop.owner_id != user_id {
            return Err(AppError::PermissionDenied);
        }

        let scooter_ids: Vec<i64> = scooters::Entity::find()
            .filter(scooters::Column::ShopId.eq(shop_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let (spans, day_overrides) = self
            .booking_service
            .load_conflict_inputs(&scooter_ids)
            .await?;
        let mut map = availability_map(
            &scooter_ids,
            query.start_date,
            query.end_date,
            &spans,
            &day_overrides,
        );

        let scooters = scooter_ids
            .iter()
            .map(|&scooter_id| ScooterCalendarResponse {
                scooter_id,
                days: map.remove(&scooter_id).unwrap_or_default(),
            })
            .collect();

        Ok(ShopAvailabilityResponse {
            shop_id,
            start_date: query.start_date,
            end_date: query.end_date,
            scooters,
        })
    }

    /// Owner toggle for a single day. Upsert keyed on (scooter_id, day);
    /// concurrent toggles of the same cell resolve to last write wins.
    pub async fn set_override(
        &self,
        user_id: i64,
        scooter_id: i64,
        day: NaiveDate,
        is_available: bool,
    ) -> AppResult<OverrideResponse> {
        let scooter = scooters::Entity::find_by_id(scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;
        let shop = shops::Entity::find_by_id(scooter.shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;
        if shop.owner_id != user_id {
            return Err(AppError::PermissionDenied);
        }

        let insert = Query::insert()
            .into_table(overrides::Entity)
            .columns([
                overrides::Column::ScooterId,
                overrides::Column::Day,
                overrides::Column::IsAvailable,
                overrides::Column::UpdatedAt,
            ])
            .values_panic([
                scooter_id.into(),
                day.into(),
                is_available.into(),
                SimpleExpr::Keyword(Keyword::CurrentTimestamp),
            ])
            .on_conflict(
                OnConflict::columns([overrides::Column::ScooterId, overrides::Column::Day])
                    .update_columns([overrides::Column::IsAvailable, overrides::Column::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();
        let (sql, values) = insert.build(PostgresQueryBuilder);
        let stmt =
            sea_orm::Statement::from_sql_and_values(sea_orm::DatabaseBackend::Postgres, sql, values);
        self.pool.execute(stmt).await?;

        log::info!(
            "Availability override for scooter {scooter_id} on {day}: {}",
            if is_available { "open" } else { "blocked" }
        );
        Ok(OverrideResponse {
            scooter_id,
            day,
            is_available,
        })
    }
}

fn validate_calendar_range(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<()> {
    if end_date < start_date {
        return Err(AppError::ValidationError(
            "End date must not be before start date".to_string(),
        ));
    }
    if (end_date - start_date).num_days() + 1 > MAX_CALENDAR_DAYS {
        return Err(AppError::ValidationError(
            "Date range too large".to_string(),
        ));
    }
    Ok(())
}
