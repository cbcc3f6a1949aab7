//! Day-off registry endpoints.

use crate::client::ShopClient;
use crate::error::Error;
use crate::types::{DayOffRange, DayOffRecord};

impl ShopClient {
    /// Fetch all day-off records.
    pub async fn list_day_offs(&self) -> Result<Vec<DayOffRecord>, Error> {
        self.get(self.api_url("dayoffs")).await
    }

    /// Submit a date range; the backend expands it into one record per day
    /// and returns the expanded records.
    pub async fn create_day_off(&self, range: &DayOffRange) -> Result<Vec<DayOffRecord>, Error> {
        self.post(self.api_url("dayoffs"), range).await
    }

    /// Delete a single day-off record, reactivating the barber for exactly
    /// that date (not the whole original range).
    pub async fn delete_day_off(&self, id: i64) -> Result<(), Error> {
        self.delete(self.api_url(&format!("dayoffs/{id}"))).await
    }
}
