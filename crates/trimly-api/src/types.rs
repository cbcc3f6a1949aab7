//! Wire types for the booking backend.
//!
//! Field names mirror the backend's JSON (camelCase where it uses it);
//! dates travel as `YYYY-MM-DD` and deserialize straight into
//! [`chrono::NaiveDate`], so no timezone conversion can creep in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Barber directory ────────────────────────────────────────────────

/// A barber directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberRecord {
    pub id: String,
    pub name: String,
    /// Role identifier (e.g. `"team.roles.head_barber"`).
    #[serde(rename = "roleKey", default)]
    pub role_key: String,
    /// Image URL or inline data URI.
    #[serde(default)]
    pub img: String,
    #[serde(rename = "descriptionIt", default)]
    pub description_it: String,
    #[serde(rename = "descriptionEn", default)]
    pub description_en: String,
}

/// Payload for creating a barber. The image is accepted inline (data URI),
/// not as a hosted URL -- the backend stores it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct NewBarber {
    pub name: String,
    #[serde(rename = "roleKey")]
    pub role_key: String,
    pub img: String,
    #[serde(rename = "descriptionIt")]
    pub description_it: String,
    #[serde(rename = "descriptionEn")]
    pub description_en: String,
}

// ── Day-off records ─────────────────────────────────────────────────

/// A single-day unavailability record for one barber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOffRecord {
    pub id: i64,
    #[serde(rename = "barberId")]
    pub barber_id: String,
    pub date: NaiveDate,
}

/// A date range submitted by the admin. The backend expands it into one
/// [`DayOffRecord`] per day and returns the expanded records.
#[derive(Debug, Clone, Serialize)]
pub struct DayOffRange {
    #[serde(rename = "barberId")]
    pub barber_id: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

// ── Bookings ────────────────────────────────────────────────────────

/// A stored booking as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    /// `None` means "any barber".
    #[serde(default)]
    pub barber: Option<String>,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub price: f64,
}

/// Payload for creating a booking (public wizard or admin manual entry).
/// `price` is derived from the service table at submission time and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
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

// ── Auth ────────────────────────────────────────────────────────────

/// Email + password pair for the admin credential check.
#[derive(Debug, Clone, Serialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Customer registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// A customer account, returned by login/register. Used to pre-fill the
/// wizard's contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
