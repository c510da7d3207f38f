use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily/weekly/monthly price trio for a scooter. Prices are integer
/// currency units (cents). Weekly/monthly are optional tiers; when present
/// they are assumed cheaper than the equivalent run of daily rates, but
/// nothing enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateCard {
    pub daily_price: i64,
    pub weekly_price: Option<i64>,
    pub monthly_price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RentalQuote {
    pub total_price: i64,
    pub breakdown: String,
    pub price_per_day: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingQuote {
    pub subtotal: i64,
    pub deposit_amount: i64,
    pub booking_fee: i64,
    pub total_price: i64,
    pub breakdown: String,
    pub price_per_day: i64,
}

// Round-half-up integer division; callers guarantee divisor > 0.
fn round_div(numerator: i64, divisor: i64) -> i64 {
    (numerator + divisor / 2) / divisor
}

/// Greedy tier decomposition of a rental duration, largest unit first.
///
/// Months are consumed first (if a monthly price exists and the stay is at
/// least 30 days), then the remainder is split into weeks and days. The
/// split is evaluated once, not re-optimized: a 35-day stay with a monthly
/// rate is one month plus five daily-rate days even if five dailies cost
/// more than a week.
///
/// Negative day counts are clamped to the zero-day quote so callers can
/// feed raw date diffs straight in.
pub fn compute_rental_price(rate: &RateCard, days: i64) -> RentalQuote {
    if days <= 0 {
        return RentalQuote {
            total_price: 0,
            breakdown: "0 days".to_string(),
            price_per_day: 0,
        };
    }

    let mut months = 0i64;
    let mut weeks = 0i64;
    let mut remaining = days;

    let monthly = rate.monthly_price.filter(|_| days >= 30);
    if monthly.is_some() {
        months = remaining / 30;
        remaining %= 30;
    }
    let weekly = rate.weekly_price.filter(|_| remaining >= 7);
    if weekly.is_some() {
        weeks = remaining / 7;
        remaining %= 7;
    }

    let total_price = months * monthly.unwrap_or(0)
        + weeks * weekly.unwrap_or(0)
        + remaining * rate.daily_price;

    let mut parts = Vec::new();
    if months > 0 {
        parts.push(format!("{months}m"));
    }
    if weeks > 0 {
        parts.push(format!("{weeks}w"));
    }
    if remaining > 0 {
        parts.push(format!("{remaining}d"));
    }

    RentalQuote {
        total_price,
        breakdown: parts.join(" + "),
        price_per_day: round_div(total_price, days),
    }
}

/// Full booking quote: rental subtotal plus deposit plus a percentage
/// booking fee on the subtotal (deposit is not fee-bearing).
pub fn compute_booking_total(
    rate: &RateCard,
    deposit_amount: i64,
    days: i64,
    booking_fee_percent: i64,
) -> BookingQuote {
    let quote = compute_rental_price(rate, days);
    let booking_fee = round_div(quote.total_price * booking_fee_percent, 100);

    BookingQuote {
        subtotal: quote.total_price,
        deposit_amount,
        booking_fee,
        total_price: quote.total_price + deposit_amount + booking_fee,
        breakdown: quote.breakdown,
        price_per_day: quote.price_per_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(daily: i64, weekly: Option<i64>, monthly: Option<i64>) -> RateCard {
        RateCard {
            daily_price: daily,
            weekly_price: weekly,
            monthly_price: monthly,
        }
    }

    #[test]
    fn test_daily_only() {
        let quote = compute_rental_price(&card(100, None, None), 5);
        assert_eq!(quote.total_price, 500);
        assert_eq!(quote.breakdown, "5d");
        assert_eq!(quote.price_per_day, 100);
    }

    #[test]
    fn test_zero_and_negative_days() {
        for days in [0, -3] {
            let quote = compute_rental_price(&card(100, None, None), days);
            assert_eq!(quote.total_price, 0);
            assert_eq!(quote.breakdown, "0 days");
            assert_eq!(quote.price_per_day, 0);
        }
    }

    #[test]
    fn test_exact_week() {
        let quote = compute_rental_price(&card(250, Some(1500), None), 7);
        assert_eq!(quote.total_price, 1500);
        assert_eq!(quote.breakdown, "1w");
    }

    #[test]
    fn test_week_plus_days() {
        let quote = compute_rental_price(&card(250, Some(1500), None), 10);
        assert_eq!(quote.total_price, 1500 + 3 * 250);
        assert_eq!(quote.breakdown, "1w + 3d");
    }

    #[test]
    fn test_month_remainder_below_week() {
        // 35 days = 1 month + 5 days; 5 < 7 so no weekly tier is used
        let quote = compute_rental_price(&card(250, Some(1500), Some(4500)), 35);
        assert_eq!(quote.total_price, 4500 + 5 * 250);
        assert_eq!(quote.breakdown, "1m + 5d");
    }

    #[test]
    fn test_month_remainder_with_week() {
        // 70 days = 2 months + 10 days = 2m + 1w + 3d
        let quote = compute_rental_price(&card(250, Some(1500), Some(4500)), 70);
        assert_eq!(quote.total_price, 2 * 4500 + 1500 + 3 * 250);
        assert_eq!(quote.breakdown, "2m + 1w + 3d");
    }

    #[test]
    fn test_monthly_absent_falls_back_to_weeks() {
        let quote = compute_rental_price(&card(100, Some(600), None), 30);
        assert_eq!(quote.total_price, 4 * 600 + 2 * 100);
        assert_eq!(quote.breakdown, "4w + 2d");
    }

    #[test]
    fn test_price_per_day_rounds_half_up() {
        // 1500 + 250 over 8 days = 218.75 -> 219
        let quote = compute_rental_price(&card(250, Some(1500), None), 8);
        assert_eq!(quote.total_price, 1750);
        assert_eq!(quote.price_per_day, 219);

        // 300 over 2 days with a weekly tier never engaged: 150 exact
        let quote = compute_rental_price(&card(150, Some(700), None), 2);
        assert_eq!(quote.price_per_day, 150);
    }

    #[test]
    fn test_total_is_monotone_for_proportional_rates() {
        // With weekly = 7x and monthly = 30x daily, the decomposition must
        // collapse to days * daily and therefore be non-decreasing.
        let rate = card(250, Some(1750), Some(7500));
        let mut prev = 0;
        for days in 0..=120 {
            let quote = compute_rental_price(&rate, days);
            assert_eq!(quote.total_price, days.max(0) * 250);
            assert!(quote.total_price >= prev);
            prev = quote.total_price;
        }
    }

    #[test]
    fn test_discounted_month_can_undercut_shorter_stays() {
        // A discounted monthly tier legitimately makes 30 days cheaper than
        // 29; the calculator quotes the tier price as-is.
        let rate = card(250, Some(1500), Some(4500));
        let d29 = compute_rental_price(&rate, 29).total_price;
        let d30 = compute_rental_price(&rate, 30).total_price;
        assert_eq!(d29, 4 * 1500 + 250);
        assert_eq!(d30, 4500);
        assert!(d30 < d29);
    }

    #[test]
    fn test_booking_total_composition() {
        let quote = compute_booking_total(&card(250, Some(1500), None), 5000, 10, 5);
        assert_eq!(quote.subtotal, 2250);
        assert_eq!(quote.deposit_amount, 5000);
        // 5% of 2250 = 112.5 -> 113
        assert_eq!(quote.booking_fee, 113);
        assert_eq!(quote.total_price, 2250 + 5000 + 113);
        assert_eq!(quote.breakdown, "1w + 3d");
    }

    #[test]
    fn test_booking_total_zero_fee() {
        let quote = compute_booking_total(&card(100, None, None), 2000, 3, 0);
        assert_eq!(quote.booking_fee, 0);
        assert_eq!(quote.total_price, 300 + 2000);
    }
}
