// Shared transport configuration for building reqwest::Client instances.
//
// The booking backend speaks plain JSON over HTTP; all the client needs is
// a timeout and a stable user agent. Kept as a struct so every consumer
// (CLI, TUI, tests) builds its client the same way.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("trimly/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }
}
