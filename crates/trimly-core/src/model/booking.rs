// ── Booking domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trimly_api::BookingRecord;

/// A stored appointment.
///
/// `service` stays a raw id rather than a [`Service`](super::Service) so
/// that bookings created against a service the table no longer knows still
/// decode and display (by raw id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    /// `None` means the customer had no barber preference.
    pub barber: Option<String>,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub price: f64,
}

impl Booking {
    /// Full customer name as displayed in the dashboard.
    pub fn customer(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl From<BookingRecord> for Booking {
    fn from(rec: BookingRecord) -> Self {
        Self {
            id: rec.id,
            barber: rec.barber,
            service: rec.service,
            date: rec.date,
            time: rec.time,
            name: rec.name,
            surname: rec.surname,
            email: rec.email,
            phone: rec.phone,
            message: rec.message,
            price: rec.price,
        }
    }
}
