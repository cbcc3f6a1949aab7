//! Reactive snapshot storage for the three backend collections.
//!
//! Every list a consumer renders is an immutable `Arc` snapshot: refreshes
//! replace collections wholesale (upsert-then-prune), local mutations
//! (create/delete) patch by id for responsiveness until the next poll
//! confirms them. `watch` subscriptions drive reactive rendering in the
//! TUI.

mod collection;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::locale::Locale;
use crate::model::{Barber, Booking, DayOff};
use collection::Collection;

/// Snapshot store for barbers, day-offs, and bookings.
pub struct DataStore {
    barbers: Collection<Barber>,
    day_offs: Collection<DayOff>,
    bookings: Collection<Booking>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            // Directory ordered by id: refetching unchanged data yields an
            // identical snapshot.
            barbers: Collection::new(|a, b| a.id.cmp(&b.id)),
            day_offs: Collection::new(|a, b| (a.date, a.id).cmp(&(b.date, b.id))),
            bookings: Collection::new(|a, b| {
                (a.date, a.time.as_str(), a.id).cmp(&(b.date, b.time.as_str(), b.id))
            }),
        }
    }

    // ── Refresh application (wholesale replacement) ──────────────────

    pub fn apply_barbers(&self, barbers: Vec<Barber>) {
        self.barbers
            .replace_all(barbers.into_iter().map(|b| (b.id.clone(), b)).collect());
    }

    pub fn apply_day_offs(&self, day_offs: Vec<DayOff>) {
        self.day_offs
            .replace_all(day_offs.into_iter().map(|d| (d.id.to_string(), d)).collect());
    }

    pub fn apply_bookings(&self, bookings: Vec<Booking>) {
        self.bookings
            .replace_all(bookings.into_iter().map(|b| (b.id.to_string(), b)).collect());
    }

    // ── Local mutations (patch by id until the next poll) ────────────

    pub fn insert_barber(&self, barber: Barber) {
        self.barbers.upsert(barber.id.clone(), barber);
    }

    pub fn remove_barber(&self, id: &str) -> Option<Arc<Barber>> {
        self.barbers.remove(id)
    }

    pub fn insert_day_offs(&self, day_offs: Vec<DayOff>) {
        for day_off in day_offs {
            self.day_offs.upsert(day_off.id.to_string(), day_off);
        }
    }

    pub fn remove_day_off(&self, id: i64) -> Option<Arc<DayOff>> {
        self.day_offs.remove(&id.to_string())
    }

    pub fn insert_booking(&self, booking: Booking) {
        self.bookings.upsert(booking.id.to_string(), booking);
    }

    pub fn remove_booking(&self, id: i64) -> Option<Arc<Booking>> {
        self.bookings.remove(&id.to_string())
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn barbers_snapshot(&self) -> Arc<Vec<Arc<Barber>>> {
        self.barbers.snapshot()
    }

    pub fn day_offs_snapshot(&self) -> Arc<Vec<Arc<DayOff>>> {
        self.day_offs.snapshot()
    }

    pub fn bookings_snapshot(&self) -> Arc<Vec<Arc<Booking>>> {
        self.bookings.snapshot()
    }

    pub fn barber(&self, id: &str) -> Option<Arc<Barber>> {
        self.barbers.get(id)
    }

    pub fn barber_count(&self) -> usize {
        self.barbers.len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_barbers(&self) -> watch::Receiver<Arc<Vec<Arc<Barber>>>> {
        self.barbers.subscribe()
    }

    pub fn subscribe_day_offs(&self) -> watch::Receiver<Arc<Vec<Arc<DayOff>>>> {
        self.day_offs.subscribe()
    }

    pub fn subscribe_bookings(&self) -> watch::Receiver<Arc<Vec<Arc<Booking>>>> {
        self.bookings.subscribe()
    }

    // ── Display helpers ──────────────────────────────────────────────

    /// Resolve a booking's barber id to a display name.
    ///
    /// `None` renders the locale's "any barber" label; an id missing from
    /// the current directory snapshot degrades to the raw id (logged, not
    /// fatal -- the directory may simply lag behind the booking list).
    pub fn barber_display_name(&self, id: Option<&str>, locale: Locale) -> String {
        let Some(id) = id else {
            return locale.any_barber().to_owned();
        };
        if let Some(barber) = self.barbers.get(id) {
            return barber.name.clone();
        }
        debug!(barber = id, "barber id not in directory snapshot; showing raw id");
        id.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn barber(id: &str, name: &str) -> Barber {
        Barber {
            id: id.to_owned(),
            name: name.to_owned(),
            role: Role::Barber,
            img: String::new(),
            description_it: String::new(),
            description_en: String::new(),
        }
    }

    fn booking(id: i64, date: &str, time: &str) -> Booking {
        Booking {
            id,
            barber: Some("b1".to_owned()),
            service: "cut".to_owned(),
            date: date.parse().expect("date"),
            time: time.to_owned(),
            name: "Mario".to_owned(),
            surname: "Rossi".to_owned(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            price: 30.0,
        }
    }

    #[test]
    fn bookings_sort_by_date_then_time() {
        let store = DataStore::new();
        store.apply_bookings(vec![
            booking(1, "2025-03-11", "09:30"),
            booking(2, "2025-03-10", "15:00"),
            booking(3, "2025-03-10", "10:00"),
        ]);

        let snap = store.bookings_snapshot();
        let order: Vec<i64> = snap.iter().map(|b| b.id).collect();
        assert_eq!(order, [3, 2, 1]);
    }

    #[test]
    fn local_delete_patches_snapshot_before_next_poll() {
        let store = DataStore::new();
        store.apply_bookings(vec![booking(42, "2025-03-10", "10:00")]);
        assert_eq!(store.booking_count(), 1);

        store.remove_booking(42);
        assert!(store.bookings_snapshot().is_empty());
    }

    #[test]
    fn barber_display_name_degrades_to_raw_id() {
        let store = DataStore::new();
        store.apply_barbers(vec![barber("b1", "Marco")]);

        assert_eq!(store.barber_display_name(Some("b1"), Locale::It), "Marco");
        assert_eq!(store.barber_display_name(Some("ghost"), Locale::It), "ghost");
        assert_eq!(store.barber_display_name(None, Locale::It), "Qualsiasi");
        assert_eq!(store.barber_display_name(None, Locale::En), "Any barber");
    }
}
