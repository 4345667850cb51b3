//! Credential encoding for the authorization handshake.

use base64::Engine;

use crate::api::types::Credentials;

/// Build the value for the `Authorization` header of b2_authorize_account.
///
/// Format: `Basic base64("{key_id}:{application_key}")`, standard alphabet
/// with padding.
pub fn basic_auth_value(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.key_id, credentials.application_key);
    let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
    format!("Basic {}", encoded)
}
