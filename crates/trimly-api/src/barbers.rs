//! Barber directory endpoints.

use crate::client::ShopClient;
use crate::error::Error;
use crate::types::{BarberRecord, NewBarber};

impl ShopClient {
    /// Fetch the full barber directory.
    pub async fn list_barbers(&self) -> Result<Vec<BarberRecord>, Error> {
        self.get(self.api_url("barbers")).await
    }

    /// Create a barber; returns the stored record with its assigned id.
    pub async fn create_barber(&self, barber: &NewBarber) -> Result<BarberRecord, Error> {
        self.post(self.api_url("barbers"), barber).await
    }

    /// Delete a barber by id. Irreversible.
    pub async fn delete_barber(&self, id: &str) -> Result<(), Error> {
        self.delete(self.api_url(&format!("barbers/{id}"))).await
    }
}
