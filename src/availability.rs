use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::entities::BookingStatus;

/// A reservation's claim on a scooter, reduced to what conflict checks need.
/// Both dates are inclusive.
#[derive(Debug, Clone)]
pub struct BookingSpan {
    pub scooter_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

/// A manual per-day availability statement by the shop owner. At most one
/// exists per (scooter_id, day); it supersedes whatever the bookings say
/// about that day.
#[derive(Debug, Clone)]
pub struct DayOverride {
    pub scooter_id: i64,
    pub day: NaiveDate,
    pub is_available: bool,
}

/// Whether "today" is still an acceptable start date for a new booking.
/// Call sites disagreed on this historically, so it is configuration
/// (`booking.allow_same_day`) rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PastDateRule {
    AllowToday,
    RequireFutureStart,
}

impl PastDateRule {
    pub fn first_bookable_day(&self, today: NaiveDate) -> NaiveDate {
        match self {
            PastDateRule::AllowToday => today,
            PastDateRule::RequireFutureStart => today + Duration::days(1),
        }
    }
}

/// Single-day resolution. An override for the exact day wins outright;
/// bookings are not consulted once one exists. Without an override the day
/// is unavailable iff some occupying booking for the scooter covers it.
pub fn is_day_available(
    scooter_id: i64,
    day: NaiveDate,
    bookings: &[BookingSpan],
    overrides: &[DayOverride],
) -> bool {
    if let Some(o) = overrides
        .iter()
        .find(|o| o.scooter_id == scooter_id && o.day == day)
    {
        return o.is_available;
    }

    !bookings.iter().any(|b| {
        b.scooter_id == scooter_id
            && b.status.occupies_scooter()
            && b.start_date <= day
            && day <= b.end_date
    })
}

/// True iff every day in the inclusive range is individually available.
/// An inverted range (end before start) is vacuously available.
pub fn is_range_available(
    scooter_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    bookings: &[BookingSpan],
    overrides: &[DayOverride],
) -> bool {
    start_date
        .iter_days()
        .take_while(|day| *day <= end_date)
        .all(|day| is_day_available(scooter_id, day, bookings, overrides))
}

/// Pre-indexed bookings and overrides for calendar-grid rendering. Built
/// once per grid so the walk does not re-scan the full booking list for
/// every day cell.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    overrides: HashMap<(i64, NaiveDate), bool>,
    spans_by_scooter: HashMap<i64, Vec<(NaiveDate, NaiveDate)>>,
}

impl AvailabilityIndex {
    pub fn build(bookings: &[BookingSpan], overrides: &[DayOverride]) -> Self {
        let mut index = AvailabilityIndex::default();
        for o in overrides {
            // later entry wins, matching the store's upsert semantics
            index.overrides.insert((o.scooter_id, o.day), o.is_available);
        }
        for b in bookings.iter().filter(|b| b.status.occupies_scooter()) {
            index
                .spans_by_scooter
                .entry(b.scooter_id)
                .or_default()
                .push((b.start_date, b.end_date));
        }
        index
    }

    pub fn is_available(&self, scooter_id: i64, day: NaiveDate) -> bool {
        if let Some(flag) = self.overrides.get(&(scooter_id, day)) {
            return *flag;
        }
        self.spans_by_scooter
            .get(&scooter_id)
            .is_none_or(|spans| !spans.iter().any(|(start, end)| *start <= day && day <= *end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct DayAvailability {
    pub day: NaiveDate,
    pub is_available: bool,
}

/// Day-by-scooter availability grid over an inclusive date range. Agrees
/// with `is_day_available` on every cell.
pub fn availability_map(
    scooter_ids: &[i64],
    start_date: NaiveDate,
    end_date: NaiveDate,
    bookings: &[BookingSpan],
    overrides: &[DayOverride],
) -> HashMap<i64, Vec<DayAvailability>> {
    let index = AvailabilityIndex::build(bookings, overrides);

    scooter_ids
        .iter()
        .map(|&scooter_id| {
            let days = start_date
                .iter_days()
                .take_while(|day| *day <= end_date)
                .map(|day| DayAvailability {
                    day,
                    is_available: index.is_available(scooter_id, day),
                })
                .collect();
            (scooter_id, days)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(scooter_id: i64, start: &str, end: &str, status: BookingStatus) -> BookingSpan {
        BookingSpan {
            scooter_id,
            start_date: date(start),
            end_date: date(end),
            status,
        }
    }

    fn blocked(scooter_id: i64, day: &str) -> DayOverride {
        DayOverride {
            scooter_id,
            day: date(day),
            is_available: false,
        }
    }

    #[test]
    fn test_free_day_is_available() {
        assert!(is_day_available(1, date("2024-01-10"), &[], &[]));
    }

    #[test]
    fn test_booking_blocks_inclusive_range() {
        let bookings = vec![booking(1, "2024-01-10", "2024-01-12", BookingStatus::Confirmed)];
        assert!(is_day_available(1, date("2024-01-09"), &bookings, &[]));
        assert!(!is_day_available(1, date("2024-01-10"), &bookings, &[]));
        assert!(!is_day_available(1, date("2024-01-11"), &bookings, &[]));
        assert!(!is_day_available(1, date("2024-01-12"), &bookings, &[]));
        assert!(is_day_available(1, date("2024-01-13"), &bookings, &[]));
    }

    #[test]
    fn test_booking_only_blocks_its_own_scooter() {
        let bookings = vec![booking(1, "2024-01-10", "2024-01-12", BookingStatus::Active)];
        assert!(is_day_available(2, date("2024-01-11"), &bookings, &[]));
    }

    #[test]
    fn test_cancelled_and_rejected_release_days() {
        for status in [BookingStatus::Cancelled, BookingStatus::Rejected] {
            let bookings = vec![booking(1, "2024-01-10", "2024-01-12", status)];
            assert!(is_day_available(1, date("2024-01-11"), &bookings, &[]));
        }
    }

    #[test]
    fn test_maintenance_occupies() {
        let bookings = vec![booking(1, "2024-01-10", "2024-01-12", BookingStatus::Maintenance)];
        assert!(!is_day_available(1, date("2024-01-11"), &bookings, &[]));
    }

    #[test]
    fn test_override_wins_over_booking() {
        let bookings = vec![booking(1, "2024-01-10", "2024-01-12", BookingStatus::Confirmed)];
        let overrides = vec![DayOverride {
            scooter_id: 1,
            day: date("2024-01-11"),
            is_available: true,
        }];
        assert!(is_day_available(1, date("2024-01-11"), &bookings, &overrides));
        // neighbouring days are still blocked by the booking
        assert!(!is_day_available(1, date("2024-01-10"), &bookings, &overrides));
    }

    #[test]
    fn test_blocking_override_on_free_day() {
        let overrides = vec![blocked(1, "2024-01-20")];
        assert!(!is_day_available(1, date("2024-01-20"), &[], &overrides));
        assert!(is_day_available(1, date("2024-01-21"), &[], &overrides));
    }

    #[test]
    fn test_override_for_other_scooter_is_ignored() {
        let overrides = vec![blocked(2, "2024-01-20")];
        assert!(is_day_available(1, date("2024-01-20"), &[], &overrides));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let bookings = vec![booking(1, "2024-01-10", "2024-01-12", BookingStatus::Requested)];
        let overrides = vec![blocked(1, "2024-01-15")];
        let first = is_day_available(1, date("2024-01-11"), &bookings, &overrides);
        let second = is_day_available(1, date("2024-01-11"), &bookings, &overrides);
        assert_eq!(first, second);
    }

    #[test]
    fn test_range_fails_on_single_blocked_day() {
        let overrides = vec![blocked(1, "2024-01-15")];
        assert!(!is_range_available(
            1,
            date("2024-01-14"),
            date("2024-01-16"),
            &[],
            &overrides
        ));
        assert!(is_range_available(
            1,
            date("2024-01-16"),
            date("2024-01-20"),
            &[],
            &overrides
        ));
    }

    #[test]
    fn test_inverted_range_is_vacuously_available() {
        assert!(is_range_available(
            1,
            date("2024-01-20"),
            date("2024-01-10"),
            &[],
            &[blocked(1, "2024-01-15")]
        ));
    }

    #[test]
    fn test_map_agrees_with_single_day_resolution() {
        let bookings = vec![
            booking(1, "2024-01-10", "2024-01-12", BookingStatus::Confirmed),
            booking(2, "2024-01-11", "2024-01-11", BookingStatus::Cancelled),
            booking(2, "2024-01-13", "2024-01-14", BookingStatus::Requested),
        ];
        let overrides = vec![
            DayOverride {
                scooter_id: 1,
                day: date("2024-01-11"),
                is_available: true,
            },
            blocked(2, "2024-01-09"),
        ];

        let start = date("2024-01-08");
        let end = date("2024-01-16");
        let map = availability_map(&[1, 2], start, end, &bookings, &overrides);

        for &scooter_id in &[1, 2] {
            let days = &map[&scooter_id];
            assert_eq!(days.len(), 9);
            for cell in days {
                assert_eq!(
                    cell.is_available,
                    is_day_available(scooter_id, cell.day, &bookings, &overrides),
                    "mismatch for scooter {scooter_id} on {}",
                    cell.day
                );
            }
        }
    }

    #[test]
    fn test_duplicate_override_last_write_wins_in_index() {
        let overrides = vec![
            blocked(1, "2024-01-15"),
            DayOverride {
                scooter_id: 1,
                day: date("2024-01-15"),
                is_available: true,
            },
        ];
        let index = AvailabilityIndex::build(&[], &overrides);
        assert!(index.is_available(1, date("2024-01-15")));
    }

    #[test]
    fn test_past_date_rule() {
        let today = date("2024-03-01");
        assert_eq!(PastDateRule::AllowToday.first_bookable_day(today), today);
        assert_eq!(
            PastDateRule::RequireFutureStart.first_bookable_day(today),
            date("2024-03-02")
        );
    }
}
