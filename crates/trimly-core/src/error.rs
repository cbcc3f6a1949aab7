// ── Core error types ──
//
// User-facing errors from trimly-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly -- the From<trimly_api::Error>
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the booking server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session closed")]
    SessionClosed,

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The backend refused a mutation (booking submit, create/delete).
    /// Carries the server's own message, distinct from connection failures.
    #[error("Rejected by the server: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<trimly_api::Error> for CoreError {
    fn from(err: trimly_api::Error) -> Self {
        match err {
            trimly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            trimly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            trimly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            trimly_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity: "resource".into(),
                identifier: message,
            },
            trimly_api::Error::Api { status, message } => {
                // Mutating calls answered 4xx carry the server's rejection
                // message; 5xx is an API fault.
                if (400..500).contains(&status) {
                    CoreError::Rejected { message }
                } else {
                    CoreError::Api {
                        message,
                        status: Some(status),
                    }
                }
            }
            trimly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

impl From<crate::wizard::WizardError> for CoreError {
    fn from(err: crate::wizard::WizardError) -> Self {
        CoreError::ValidationFailed {
            message: err.to_string(),
        }
    }
}
