//! Backblaze B2 API HTTP client.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};

use crate::api::auth::basic_auth_value;
use crate::api::types::{B2ErrorBody, B2Session, Credentials, DownloadFileRequest};
use crate::error::{Error, Result};

/// Base URL of the fixed, well-known authorization endpoint.
const DEFAULT_AUTH_BASE: &str = "https://api.backblazeb2.com";

/// Account authorization endpoint path (API v2).
const AUTHORIZE_PATH: &str = "/b2api/v2/b2_authorize_account";

/// Download-by-id endpoint path, relative to the session's API URL.
const DOWNLOAD_BY_ID_PATH: &str = "/b2api/v2/b2_download_file_by_id";

/// User agent sent on every request.
const USER_AGENT: &str = concat!("b2-downloader/", env!("CARGO_PKG_VERSION"));

/// Connect timeout. The read timeout is operator-configurable and bounds
/// inter-chunk latency, not total transfer time.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// B2 API client.
pub struct B2Client {
    client: Client,
    auth_base: String,
}

impl B2Client {
    /// Create a client against the production authorization endpoint.
    pub fn new(read_timeout: Duration) -> Result<Self> {
        Self::with_auth_base(DEFAULT_AUTH_BASE, read_timeout)
    }

    /// Create a client against a custom authorization endpoint.
    ///
    /// Tests point this at a local mock server.
    pub fn with_auth_base(auth_base: impl Into<String>, read_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(read_timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            auth_base: auth_base.into(),
        })
    }

    /// Exchange credentials for a session.
    ///
    /// Issues a single GET with HTTP Basic credentials. Any non-success
    /// status is fatal; there is no retry.
    pub async fn authorize_account(&self, credentials: &Credentials) -> Result<B2Session> {
        let url = format!("{}{}", self.auth_base, AUTHORIZE_PATH);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, basic_auth_value(credentials))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Authorization response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication(format_http_error(status, &body)));
        }

        let text = response.text().await?;
        let session: B2Session = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse authorization response: {} - Response: {}",
                e, text
            ))
        })?;

        if !session.is_complete() {
            return Err(Error::Api(
                "Authorization response is missing the token or base URLs".into(),
            ));
        }

        Ok(session)
    }

    /// Request a file's bytes by its B2 file ID.
    ///
    /// Returns the raw `Response` so callers can consume the body as a
    /// bounded-size chunk stream. Any non-success status is fatal before a
    /// body byte is consumed. B2 expects the bare authorization token in the
    /// `Authorization` header, not a `Bearer` scheme.
    pub async fn download_file_by_id(
        &self,
        session: &B2Session,
        file_id: &str,
    ) -> Result<Response> {
        if session.authorization_token.is_empty() {
            return Err(Error::Api(
                "Refusing to download without an authorization token".into(),
            ));
        }

        let url = format!("{}{}", session.api_url, DOWNLOAD_BY_ID_PATH);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, &session.authorization_token)
            .json(&DownloadFileRequest { file_id })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Download response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Download(format_http_error(status, &body)));
        }

        Ok(response)
    }
}

/// Render a non-success response for the operator, using B2's JSON error
/// document when the body carries one.
fn format_http_error(status: StatusCode, body: &str) -> String {
    if let Ok(b2_error) = serde_json::from_str::<B2ErrorBody>(body) {
        return format!(
            "HTTP {} ({}): {}",
            status.as_u16(),
            b2_error.code,
            b2_error.message
        );
    }

    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}
