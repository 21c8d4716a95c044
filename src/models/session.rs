use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_non_empty, email_local_part};

/// Seconds before expiry at which a session is treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Fallback author name when neither a display name nor an e-mail is known.
pub const ANONYMOUS_NAME: &str = "Usuario";

/// Metadata stored with the auth user at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMetadata {
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub avatar_url: Option<String>,
}

/// The authenticated identity, as returned by the auth API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Name shown next to things this user writes.
    ///
    /// Metadata full name, else the e-mail local part, else "Usuario".
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.user_metadata.full_name {
            return name.clone();
        }
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => email_local_part(email).to_string(),
            _ => ANONYMOUS_NAME.to_string(),
        }
    }
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which the access token expires
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Check if the access token is expired (or about to be).
    ///
    /// Falls back to the `exp` claim of the token when `expires_at` is unknown.
    /// A token whose expiry cannot be determined is considered valid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at.or_else(|| jwt_expiry(&self.access_token)) {
            Some(expires_at) => Utc::now().timestamp() + EXPIRY_MARGIN_SECS >= expires_at,
            None => false,
        }
    }
}

/// Read the `exp` claim from a JWT without verifying it.
pub(crate) fn jwt_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}
