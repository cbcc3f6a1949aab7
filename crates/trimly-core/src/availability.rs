//! Availability computation over snapshot data.
//!
//! Pure functions fed by [`DataStore`](crate::DataStore) snapshots: which
//! barbers are selectable for a date, which slots remain free for a
//! `(date, barber)` pair, and the admin's per-barber daily availability
//! view. Day-off filtering happens here and nowhere else.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::model::{Barber, Booking, DayOff, slot_grid};

/// Whether any day-off record covers `barber_id` on `date`.
pub fn barber_is_off(day_offs: &[Arc<DayOff>], barber_id: &str, date: NaiveDate) -> bool {
    day_offs.iter().any(|d| d.covers(barber_id, date))
}

/// Every directory barber selectable for `date` -- i.e. without a day-off
/// covering it. The "any barber" choice is always offered on top of this
/// list by the caller.
pub fn selectable_barbers(
    barbers: &[Arc<Barber>],
    day_offs: &[Arc<DayOff>],
    date: NaiveDate,
) -> Vec<Arc<Barber>> {
    barbers
        .iter()
        .filter(|b| !barber_is_off(day_offs, &b.id, date))
        .map(Arc::clone)
        .collect()
}

/// Whether every barber in the directory has a day off on `date`.
///
/// Distinct from an empty directory: callers render a "whole team is off"
/// indicator instead of a bare empty list.
pub fn all_barbers_off(barbers: &[Arc<Barber>], day_offs: &[Arc<DayOff>], date: NaiveDate) -> bool {
    !barbers.is_empty() && barbers.iter().all(|b| barber_is_off(day_offs, &b.id, date))
}

/// The grid slots not present in `reserved`, in grid order.
pub fn free_slots(reserved: &[String]) -> Vec<&'static str> {
    slot_grid()
        .iter()
        .copied()
        .filter(|slot| !reserved.iter().any(|r| r == slot))
        .collect()
}

/// Whether every slot on the grid is reserved. Callers render a
/// "fully booked" indicator instead of an empty grid.
pub fn fully_booked(reserved: &[String]) -> bool {
    slot_grid().iter().all(|slot| reserved.iter().any(|r| r == slot))
}

/// One row of the admin's daily availability sidebar.
#[derive(Debug, Clone)]
pub struct DailyAvailability {
    pub barber: Arc<Barber>,
    /// A day-off record covers the selected date; free slots are empty
    /// and the row is flagged.
    pub is_day_off: bool,
    pub free_slots: Vec<&'static str>,
}

/// Per-barber free slots for `date`, computed from that date's bookings.
/// A day off short-circuits to no availability.
pub fn daily_availability(
    barbers: &[Arc<Barber>],
    day_offs: &[Arc<DayOff>],
    bookings: &[Arc<Booking>],
    date: NaiveDate,
) -> Vec<DailyAvailability> {
    let bookings_for_date: Vec<&Arc<Booking>> =
        bookings.iter().filter(|b| b.date == date).collect();

    barbers
        .iter()
        .map(|barber| {
            if barber_is_off(day_offs, &barber.id, date) {
                return DailyAvailability {
                    barber: Arc::clone(barber),
                    is_day_off: true,
                    free_slots: Vec::new(),
                };
            }

            let booked: Vec<String> = bookings_for_date
                .iter()
                .filter(|b| b.barber.as_deref() == Some(barber.id.as_str()))
                .map(|b| b.time.clone())
                .collect();

            DailyAvailability {
                barber: Arc::clone(barber),
                is_day_off: false,
                free_slots: free_slots(&booked),
            }
        })
        .collect()
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

    fn day_off(id: i64, barber_id: &str, date: &str) -> Arc<DayOff> {
        Arc::new(DayOff {
            id,
            barber_id: barber_id.to_owned(),
            date: date.parse().expect("date"),
        })
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    #[test]
    fn day_off_excludes_barber_for_covered_dates_only() {
        let barbers = vec![barber("b1"), barber("b2")];
        // Range 2025-03-10..=2025-03-12 expanded server-side.
        let day_offs = vec![
            day_off(1, "b1", "2025-03-10"),
            day_off(2, "b1", "2025-03-11"),
            day_off(3, "b1", "2025-03-12"),
        ];

        for covered in ["2025-03-10", "2025-03-11", "2025-03-12"] {
            let selectable = selectable_barbers(&barbers, &day_offs, d(covered));
            assert!(
                !selectable.iter().any(|b| b.id == "b1"),
                "b1 selectable on {covered}"
            );
            assert!(selectable.iter().any(|b| b.id == "b2"));
        }
        for free in ["2025-03-09", "2025-03-13"] {
            let selectable = selectable_barbers(&barbers, &day_offs, d(free));
            assert!(selectable.iter().any(|b| b.id == "b1"), "b1 missing on {free}");
        }
    }

    #[test]
    fn whole_team_off_is_flagged() {
        let barbers = vec![barber("b1"), barber("b2")];
        let day_offs = vec![day_off(1, "b1", "2025-03-10"), day_off(2, "b2", "2025-03-10")];

        assert!(all_barbers_off(&barbers, &day_offs, d("2025-03-10")));
        assert!(!all_barbers_off(&barbers, &day_offs, d("2025-03-11")));
        // An empty directory is not "everyone is off".
        assert!(!all_barbers_off(&[], &day_offs, d("2025-03-10")));
    }

    #[test]
    fn free_slots_removes_exactly_the_reserved_labels() {
        let reserved = vec!["10:00".to_owned(), "10:30".to_owned()];
        let free = free_slots(&reserved);
        assert_eq!(free.len(), slot_grid().len() - 2);
        assert!(!free.contains(&"10:00"));
        assert!(!free.contains(&"10:30"));
        assert!(free.contains(&"09:30"));
        assert!(free.contains(&"19:00"));
    }

    #[test]
    fn fully_booked_requires_every_slot() {
        let all: Vec<String> = slot_grid().iter().map(|s| (*s).to_owned()).collect();
        assert!(fully_booked(&all));

        let mut one_free = all.clone();
        one_free.pop();
        assert!(!fully_booked(&one_free));
    }

    #[test]
    fn daily_availability_flags_day_off_and_subtracts_bookings() {
        let barbers = vec![barber("b1"), barber("b2")];
        let day_offs = vec![day_off(1, "b2", "2025-03-10")];
        let bookings = vec![Arc::new(Booking {
            id: 1,
            barber: Some("b1".to_owned()),
            service: "cut".to_owned(),
            date: d("2025-03-10"),
            time: "10:00".to_owned(),
            name: "Mario".to_owned(),
            surname: "Rossi".to_owned(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            price: 30.0,
        })];

        let rows = daily_availability(&barbers, &day_offs, &bookings, d("2025-03-10"));
        assert_eq!(rows.len(), 2);

        let b1 = &rows[0];
        assert!(!b1.is_day_off);
        assert!(!b1.free_slots.contains(&"10:00"));
        assert_eq!(b1.free_slots.len(), slot_grid().len() - 1);

        let b2 = &rows[1];
        assert!(b2.is_day_off);
        assert!(b2.free_slots.is_empty());
    }
}
