//! Errors returned by the remote data gateway.
//!
//! Every gateway call resolves to `Result<T, GatewayError>`. The backend speaks
//! three slightly different error dialects (REST rows, auth, storage); they are
//! all folded into [`GatewayError::Api`] by [`GatewayError::from_response`].

use serde::Deserialize;
use thiserror::Error;

use crate::traits::HttpError;

/// Error code the REST layer returns when a single row was requested and none
/// matched.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Failure of a single remote call.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// A 2xx body that did not match the expected shape.
    #[error("invalid response: {message}")]
    Decode { message: String },

    /// The call needs a session and there is none.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// The request could not be built (bad path, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Union of the error bodies the backend services emit.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl GatewayError {
    /// Build an [`GatewayError::Api`] from a failed response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();

        let code = parsed
            .error_code
            .clone()
            .or_else(|| match &parsed.code {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                _ => None,
            })
            .or_else(|| parsed.error.clone());

        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                if text.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    text.chars().take(200).collect()
                }
            });

        GatewayError::Api {
            status,
            code,
            message,
            details: parsed.details,
            hint: parsed.hint,
        }
    }

    /// Backend error code, when the backend supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            GatewayError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend reported "zero rows" for a single-row request,
    /// or the resource itself was not found.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(NO_ROWS_CODE) || self.status() == Some(404)
    }

    /// True when the backend rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::NotAuthenticated) || self.status() == Some(401)
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) => "E_GW_TRANSPORT",
            GatewayError::Api { .. } if self.is_not_found() => "E_GW_NOT_FOUND",
            GatewayError::Api { .. } => "E_GW_API",
            GatewayError::Decode { .. } => "E_GW_DECODE",
            GatewayError::NotAuthenticated => "E_GW_NO_SESSION",
            GatewayError::InvalidRequest(_) => "E_GW_REQUEST",
        }
    }

    /// Backend message suitable for showing as-is (auth errors such as
    /// "Invalid login credentials" are meant for the user).
    pub fn backend_message(&self) -> String {
        match self {
            GatewayError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_body() {
        let body = br#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err = GatewayError::from_response(406, body);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(406));
        assert_eq!(err.error_code(), "E_GW_NOT_FOUND");
        match err {
            GatewayError::Api { details, .. } => {
                assert_eq!(details.as_deref(), Some("The result contains 0 rows"));
            }
            _ => panic!("expected Api error"),
        }
    }

    #[test]
    fn test_auth_error_body() {
        let body = br#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        let err = GatewayError::from_response(400, body);
        assert_eq!(err.code(), Some("invalid_credentials"));
        assert_eq!(err.backend_message(), "Invalid login credentials");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_legacy_auth_error_body() {
        let body = br#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#;
        let err = GatewayError::from_response(400, body);
        assert_eq!(err.code(), Some("invalid_grant"));
        assert_eq!(err.backend_message(), "Invalid Refresh Token");
    }

    #[test]
    fn test_storage_error_body() {
        let body = br#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#;
        let err = GatewayError::from_response(409, body);
        assert_eq!(err.code(), Some("Duplicate"));
        assert_eq!(err.backend_message(), "The resource already exists");
    }

    #[test]
    fn test_non_json_body() {
        let err = GatewayError::from_response(502, b"Bad Gateway");
        assert_eq!(err.backend_message(), "Bad Gateway");
        assert_eq!(err.code(), None);

        let empty = GatewayError::from_response(500, b"");
        assert_eq!(empty.backend_message(), "HTTP 500");
    }

    #[test]
    fn test_unauthorized() {
        assert!(GatewayError::NotAuthenticated.is_unauthorized());
        assert!(GatewayError::from_response(401, b"{}").is_unauthorized());
        assert!(!GatewayError::from_response(403, b"{}").is_unauthorized());
    }

    #[test]
    fn test_transport_from_http_error() {
        let err: GatewayError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err.error_code(), "E_GW_TRANSPORT");
        assert!(err.to_string().contains("refused"));
    }
}
