//! API request and response type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// B2 application key credentials.
#[derive(Clone)]
pub struct Credentials {
    pub key_id: String,
    pub application_key: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, application_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            application_key: application_key.into(),
        }
    }
}

/// Keeps the application key out of logs and debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("application_key", &"<redacted>")
            .finish()
    }
}

/// Session returned by b2_authorize_account.
///
/// The service sends more fields (allowed capabilities, recommended part
/// sizes); only what downstream code consumes is deserialized here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2Session {
    #[serde(default)]
    pub account_id: Option<String>,
    pub authorization_token: String,
    pub api_url: String,
    pub download_url: String,
}

impl B2Session {
    /// Check that every field required by later API calls is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.authorization_token.is_empty()
            && !self.api_url.is_empty()
            && !self.download_url.is_empty()
    }
}

/// JSON body for b2_download_file_by_id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFileRequest<'a> {
    pub file_id: &'a str,
}

/// Error document B2 returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct B2ErrorBody {
    pub status: u16,
    pub code: String,
    pub message: String,
}
