//! Booking endpoints, including the reserved-slot query.

use chrono::NaiveDate;

use crate::client::ShopClient;
use crate::error::Error;
use crate::types::{BookingRecord, NewBooking};

/// Barber query value for the reserved-slot endpoint when no specific
/// barber is chosen. Which slots count as reserved for `any` is defined by
/// the backend; the client renders whatever comes back.
pub const ANY_BARBER: &str = "any";

impl ShopClient {
    /// Fetch every booking.
    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, Error> {
        self.get(self.api_url("bookings")).await
    }

    /// Fetch the bookings already taken for a `(date, barber)` pair.
    ///
    /// `barber = None` queries with [`ANY_BARBER`]. Callers typically only
    /// need the `time` fields, but the backend returns full records.
    pub async fn reserved_bookings(
        &self,
        date: NaiveDate,
        barber: Option<&str>,
    ) -> Result<Vec<BookingRecord>, Error> {
        let mut url = self.api_url("bookings/reserved");
        url.query_pairs_mut()
            .append_pair("date", &date.format("%Y-%m-%d").to_string())
            .append_pair("barber", barber.unwrap_or(ANY_BARBER));
        self.get(url).await
    }

    /// Create a booking; returns the stored record with its assigned id.
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, Error> {
        self.post(self.api_url("bookings"), booking).await
    }

    /// Delete a booking by id.
    pub async fn delete_booking(&self, id: i64) -> Result<(), Error> {
        self.delete(self.api_url(&format!("bookings/{id}"))).await
    }
}
