use crate::availability::{BookingSpan, DayOverride, PastDateRule, is_range_available};
use crate::config::BookingConfig;
use crate::entities::{
    BookingStatus, availability_override_entity as overrides, booking_entity as bookings,
    scooter_entity as scooters, shop_entity as shops,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::pricing::compute_booking_total;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct BookingService {
    pool: DatabaseConnection,
    booking_config: BookingConfig,
}

impl BookingService {
    pub fn new(pool: DatabaseConnection, booking_config: BookingConfig) -> Self {
        Self {
            pool,
            booking_config,
        }
    }

    /// Booking request: gate on availability, freeze the quoted amounts on
    /// the row, insert as `requested`.
    pub async fn create_booking(
        &self,
        renter_id: i64,
        request: CreateBookingRequest,
    ) -> AppResult<BookingResponse> {
        if request.end_date < request.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let rule = if self.booking_config.allow_same_day {
            PastDateRule::AllowToday
        } else {
            PastDateRule::RequireFutureStart
        };
        let today = Utc::now().date_naive();
        if request.start_date < rule.first_bookable_day(today) {
            return Err(AppError::ValidationError(
                "Booking must not start in the past".to_string(),
            ));
        }

        let scooter = scooters::Entity::find_by_id(request.scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;
        if !scooter.is_listed {
            return Err(AppError::NotFound("Scooter not found".to_string()));
        }

        let (spans, day_overrides) = self.load_conflict_inputs(&[scooter.id]).await?;
        if !is_range_available(
            scooter.id,
            request.start_date,
            request.end_date,
            &spans,
            &day_overrides,
        ) {
            return Err(AppError::Conflict(
                "Scooter is not available for the requested dates".to_string(),
            ));
        }

        let days = (request.end_date - request.start_date).num_days() + 1;
        let quote = compute_booking_total(
            &scooter.rate_card(),
            scooter.deposit_amount,
            days,
            self.booking_config.fee_percent,
        );

        let booking = bookings::ActiveModel {
            scooter_id: Set(scooter.id),
            renter_id: Set(renter_id),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            status: Set(BookingStatus::Requested),
            subtotal: Set(quote.subtotal),
            deposit_amount: Set(quote.deposit_amount),
            booking_fee: Set(quote.booking_fee),
            total_price: Set(quote.total_price),
            price_breakdown: Set(quote.breakdown),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Booking {} requested for scooter {} ({} - {}, total {})",
            booking.id,
            booking.scooter_id,
            booking.start_date,
            booking.end_date,
            booking.total_price
        );
        Ok(BookingResponse::from(booking))
    }

    pub async fn list_renter_bookings(
        &self,
        renter_id: i64,
        query: &BookingQuery,
    ) -> AppResult<PaginatedResponse<BookingResponse>> {
        let mut filter = bookings::Entity::find().filter(bookings::Column::RenterId.eq(renter_id));
        if let Some(status) = query.status {
            filter = filter.filter(bookings::Column::Status.eq(status));
        }
        self.paginate(filter, query).await
    }

    pub async fn list_shop_bookings(
        &self,
        user_id: i64,
        shop_id: i64,
        query: &BookingQuery,
    ) -> AppResult<PaginatedResponse<BookingResponse>> {
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

        let mut filter =
            bookings::Entity::find().filter(bookings::Column::ScooterId.is_in(scooter_ids));
        if let Some(status) = query.status {
            filter = filter.filter(bookings::Column::Status.eq(status));
        }
        self.paginate(filter, query).await
    }

    /// Status transition by either party. Owners move a booking through its
    /// lifecycle; renters can only cancel their own booking while it has
    /// not started. The date range itself is immutable.
    pub async fn update_status(
        &self,
        user_id: i64,
        booking_id: i64,
        new_status: BookingStatus,
    ) -> AppResult<BookingResponse> {
        let booking = bookings::Entity::find_by_id(booking_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let scooter = scooters::Entity::find_by_id(booking.scooter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scooter not found".to_string()))?;
        let shop = shops::Entity::find_by_id(scooter.shop_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shop not found".to_string()))?;

        let allowed = if user_id == shop.owner_id {
            owner_transition_allowed(booking.status, new_status)
        } else if user_id == booking.renter_id {
            renter_transition_allowed(booking.status, new_status)
        } else {
            return Err(AppError::PermissionDenied);
        };
        if !allowed {
            return Err(AppError::Conflict(format!(
                "Cannot move booking from {} to {}",
                booking.status, new_status
            )));
        }

        let mut model = booking.into_active_model();
        model.status = Set(new_status);
        let updated = model.update(&self.pool).await?;

        log::info!("Booking {} is now {}", updated.id, updated.status);
        Ok(BookingResponse::from(updated))
    }

    async fn paginate(
        &self,
        filter: sea_orm::Select<bookings::Entity>,
        query: &BookingQuery,
    ) -> AppResult<PaginatedResponse<BookingResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

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
            .order_by_desc(bookings::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;
        let items: Vec<BookingResponse> = models.into_iter().map(BookingResponse::from).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Bookings and overrides for a set of scooters, in the shape the
    /// availability resolver consumes.
    pub async fn load_conflict_inputs(
        &self,
        scooter_ids: &[i64],
    ) -> AppResult<(Vec<BookingSpan>, Vec<DayOverride>)> {
        let spans = bookings::Entity::find()
            .filter(bookings::Column::ScooterId.is_in(scooter_ids.to_vec()))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|b| BookingSpan {
                scooter_id: b.scooter_id,
                start_date: b.start_date,
                end_date: b.end_date,
                status: b.status,
            })
            .collect();

        let day_overrides = overrides::Entity::find()
            .filter(overrides::Column::ScooterId.is_in(scooter_ids.to_vec()))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|o| DayOverride {
                scooter_id: o.scooter_id,
                day: o.day,
                is_available: o.is_available,
            })
            .collect();

        Ok((spans, day_overrides))
    }
}

fn owner_transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Requested | Pending, Confirmed)
            | (Requested | Pending, Rejected)
            | (Confirmed, Active)
            | (Confirmed, Cancelled)
            | (Active, Completed)
    )
}

fn renter_transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!((from, to), (Requested | Pending | Confirmed, Cancelled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn test_owner_lifecycle_transitions() {
        assert!(owner_transition_allowed(Requested, Confirmed));
        assert!(owner_transition_allowed(Requested, Rejected));
        assert!(owner_transition_allowed(Pending, Confirmed));
        assert!(owner_transition_allowed(Confirmed, Active));
        assert!(owner_transition_allowed(Confirmed, Cancelled));
        assert!(owner_transition_allowed(Active, Completed));
    }

    #[test]
    fn test_owner_cannot_skip_or_rewind() {
        assert!(!owner_transition_allowed(Requested, Active));
        assert!(!owner_transition_allowed(Requested, Completed));
        assert!(!owner_transition_allowed(Completed, Active));
        assert!(!owner_transition_allowed(Cancelled, Confirmed));
        assert!(!owner_transition_allowed(Active, Rejected));
    }

    #[test]
    fn test_renter_can_only_cancel_before_start() {
        assert!(renter_transition_allowed(Requested, Cancelled));
        assert!(renter_transition_allowed(Confirmed, Cancelled));
        assert!(!renter_transition_allowed(Active, Cancelled));
        assert!(!renter_transition_allowed(Requested, Confirmed));
        assert!(!renter_transition_allowed(Completed, Cancelled));
    }
}
