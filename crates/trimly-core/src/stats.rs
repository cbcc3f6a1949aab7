//! Per-barber revenue aggregation.
//!
//! A pure function over the current booking and directory snapshots --
//! recomputed wholesale on every snapshot change, never incrementally
//! maintained, so the numbers can't drift from the data.
//!
//! Dates travel as `YYYY-MM-DD` and live in [`NaiveDate`], so a booking's
//! calendar day is compared as-is: no UTC conversion, no off-by-one-day
//! error across timezones.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tracing::warn;

use crate::model::{Barber, Booking};

/// Running revenue sums for one barber.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct RevenueTotals {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

/// Compute daily / weekly / monthly revenue per barber.
///
/// Bucket boundaries relative to `today`: the day itself, the Monday of
/// its week, and the first of its month. A booking contributes to a bucket
/// iff its date is on or after the boundary (all buckets share the
/// implicit "now" upper bound). Bookings without a positive price are
/// skipped; bookings whose barber id is not in the directory fall back to
/// an ASCII-case-insensitive match before being dropped with a warning.
pub fn revenue_by_barber(
    bookings: &[Arc<Booking>],
    barbers: &[Arc<Barber>],
    today: NaiveDate,
) -> BTreeMap<String, RevenueTotals> {
    let week_start = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let month_start = today.with_day(1).unwrap_or(today);

    let mut totals: BTreeMap<String, RevenueTotals> = barbers
        .iter()
        .map(|b| (b.id.clone(), RevenueTotals::default()))
        .collect();

    for booking in bookings {
        if booking.price <= 0.0 {
            continue;
        }

        let Some(raw_id) = booking.barber.as_deref() else {
            warn!(booking = booking.id, "booking has no barber; excluded from stats");
            continue;
        };

        // Exact id match first, then tolerate casing mismatches between
        // the stored id and the directory's canonical id.
        let canonical = if totals.contains_key(raw_id) {
            raw_id.to_owned()
        } else if let Some(matched) = barbers.iter().find(|b| b.id.eq_ignore_ascii_case(raw_id)) {
            matched.id.clone()
        } else {
            warn!(
                booking = booking.id,
                barber = raw_id,
                "barber id not found in directory; excluded from stats"
            );
            continue;
        };

        let entry = totals.entry(canonical).or_default();
        if booking.date >= today {
            entry.daily += booking.price;
        }
        if booking.date >= week_start {
            entry.weekly += booking.price;
        }
        if booking.date >= month_start {
            entry.monthly += booking.price;
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn barber(id: &str) -> Arc<Barber> {
        Arc::new(Barber {
            id: id.to_owned(),
            name: id.to_uppercase(),
            role: Role::Barber,
            img: String::new(),
            description_it: String::new(),
            description_en: String::new(),
        })
    }

    fn booking(id: i64, barber: Option<&str>, date: &str, price: f64) -> Arc<Booking> {
        Arc::new(Booking {
            id,
            barber: barber.map(str::to_owned),
            service: "cut".to_owned(),
            date: date.parse().expect("date"),
            time: "10:00".to_owned(),
            name: "Mario".to_owned(),
            surname: "Rossi".to_owned(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            price,
        })
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    #[test]
    fn today_contributes_to_all_buckets() {
        // 2025-03-12 is a Wednesday.
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![booking(1, Some("b1"), "2025-03-12", 30.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        let b1 = stats.get("b1").expect("b1");
        assert_eq!(b1.daily, 30.0);
        assert_eq!(b1.weekly, 30.0);
        assert_eq!(b1.monthly, 30.0);
    }

    #[test]
    fn eight_days_ago_is_monthly_only() {
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        // 2025-03-04 is before Monday 2025-03-10 but in the same month.
        let bookings = vec![booking(1, Some("b1"), "2025-03-04", 45.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        let b1 = stats.get("b1").expect("b1");
        assert_eq!(b1.daily, 0.0);
        assert_eq!(b1.weekly, 0.0);
        assert_eq!(b1.monthly, 45.0);
    }

    #[test]
    fn previous_month_contributes_nowhere() {
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![booking(1, Some("b1"), "2025-02-28", 45.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        assert_eq!(*stats.get("b1").expect("b1"), RevenueTotals::default());
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-03-10 is a Monday; a Sunday booking the day before is out.
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![
            booking(1, Some("b1"), "2025-03-10", 30.0),
            booking(2, Some("b1"), "2025-03-09", 20.0),
        ];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        let b1 = stats.get("b1").expect("b1");
        assert_eq!(b1.weekly, 30.0);
        assert_eq!(b1.monthly, 50.0);
    }

    #[test]
    fn future_bookings_count_toward_every_bucket() {
        // All buckets are ">= start"; a booking later this week sits past
        // every boundary, matching the dashboard's running-sum semantics.
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![booking(1, Some("b1"), "2025-03-14", 25.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        let b1 = stats.get("b1").expect("b1");
        assert_eq!(b1.daily, 25.0);
        assert_eq!(b1.weekly, 25.0);
        assert_eq!(b1.monthly, 25.0);
    }

    #[test]
    fn barber_id_matching_tolerates_case() {
        let today = d("2025-03-12");
        let barbers = vec![barber("B1")];
        let bookings = vec![booking(1, Some("b1"), "2025-03-12", 30.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        assert_eq!(stats.get("B1").expect("B1").daily, 30.0);
    }

    #[test]
    fn unknown_and_missing_barbers_are_excluded() {
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![
            booking(1, Some("ghost"), "2025-03-12", 30.0),
            booking(2, None, "2025-03-12", 30.0),
        ];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        assert_eq!(*stats.get("b1").expect("b1"), RevenueTotals::default());
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn zero_priced_bookings_are_skipped() {
        let today = d("2025-03-12");
        let barbers = vec![barber("b1")];
        let bookings = vec![booking(1, Some("b1"), "2025-03-12", 0.0)];

        let stats = revenue_by_barber(&bookings, &barbers, today);
        assert_eq!(*stats.get("b1").expect("b1"), RevenueTotals::default());
    }
}
