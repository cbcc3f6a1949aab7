//! Customer account auth and the admin credential check.
//!
//! The admin check returns a bare JSON boolean. A `true` response is a
//! convenience signal only -- the backend must independently authorize
//! every mutating call; the client never treats the resulting local
//! session marker as authorization.

use serde_json::json;

use crate::client::ShopClient;
use crate::error::Error;
use crate::types::{AdminCredentials, CustomerAccount, RegisterRequest};

impl ShopClient {
    /// Log a customer in; returns the account used to pre-fill contact
    /// fields in the booking wizard.
    pub async fn login(&self, email: &str, password: &str) -> Result<CustomerAccount, Error> {
        let body = json!({ "email": email, "password": password });
        self.post(self.api_url("auth/login"), &body).await
    }

    /// Register a new customer account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<CustomerAccount, Error> {
        self.post(self.api_url("auth/register"), request).await
    }

    /// Delete a customer account. Irreversible.
    pub async fn delete_account(&self, id: i64) -> Result<(), Error> {
        self.delete(self.api_url(&format!("auth/{id}"))).await
    }

    /// Check admin credentials; the backend answers `true` or `false`.
    pub async fn check_admin(&self, credentials: &AdminCredentials) -> Result<bool, Error> {
        self.post(self.api_url("bookings/auth"), credentials).await
    }
}
