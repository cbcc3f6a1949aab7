// ── Day-off domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trimly_api::DayOffRecord;

/// A single calendar day on which one barber is unavailable.
///
/// Admin-submitted ranges are expanded into per-day records server-side;
/// deleting a record reactivates the barber for exactly that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOff {
    pub id: i64,
    pub barber_id: String,
    pub date: NaiveDate,
}

impl DayOff {
    /// Whether this record makes `barber_id` unavailable on `date`.
    pub fn covers(&self, barber_id: &str, date: NaiveDate) -> bool {
        self.barber_id == barber_id && self.date == date
    }
}

impl From<DayOffRecord> for DayOff {
    fn from(rec: DayOffRecord) -> Self {
        Self {
            id: rec.id,
            barber_id: rec.barber_id,
            date: rec.date,
        }
    }
}
