// Booking backend HTTP client
//
// Wraps `reqwest::Client` with base-URL construction and uniform response
// handling. All endpoint groups (barbers, bookings, dayoffs, auth) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the booking backend.
///
/// The backend returns plain JSON (no envelope): arrays for list endpoints,
/// the stored record for creates, and empty bodies for deletes. Non-success
/// responses carry a free-form message body which is surfaced verbatim.
#[derive(Clone)]
pub struct ShopClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShopClient {
    /// Create a new client from a base URL and transport config.
    ///
    /// `base_url` should be the API root (e.g. `http://localhost:8081/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a DELETE request; the backend returns an empty body on success.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, resp.text().await.unwrap_or_default()))
    }

    /// Decode a successful JSON response, or map a non-success status to
    /// the error taxonomy. The body of a failed response is the server's
    /// message -- surfaced as-is so callers can show it to the user.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    fn status_error(status: StatusCode, body: String) -> Error {
        let message = extract_message(&body);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Error::Authentication { message };
        }
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend sometimes responds with `{"error": "..."}` and sometimes
/// with plain text; fall back to a truncated raw body.
fn extract_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message) {
            return msg;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request rejected by the server".to_owned()
    } else {
        trimmed[..trimmed.len().min(200)].to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_without_duplicate_slashes() {
        let client = ShopClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:8081/api/").expect("url"),
        );
        assert_eq!(
            client.api_url("/bookings").as_str(),
            "http://localhost:8081/api/bookings"
        );
        assert_eq!(
            client.api_url("barbers").as_str(),
            "http://localhost:8081/api/barbers"
        );
    }

    #[test]
    fn extract_message_prefers_json_error_field() {
        assert_eq!(extract_message(r#"{"error":"bad slot"}"#), "bad slot");
        assert_eq!(extract_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(extract_message("plain failure"), "plain failure");
        assert_eq!(extract_message("  "), "request rejected by the server");
    }
}
