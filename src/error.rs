//! Error types for the DocuSign client.
//!
//! Every operation returns [`DocuSignError`]. An HTTP status other than the one
//! the endpoint is documented to return always surfaces as
//! [`DocuSignError::UnexpectedStatus`]; failures of the OAuth2 endpoints have
//! their own variant.

use thiserror::Error;

/// Result type for DocuSign operations.
pub type Result<T> = std::result::Result<T, DocuSignError>;

/// Errors that can occur when talking to DocuSign.
#[derive(Error, Debug)]
pub enum DocuSignError {
    /// The request could not be sent (connection refused, timeout, TLS...).
    #[error("DocuSign request error: {method} {url} failed; Error: {source}")]
    Transport {
        /// HTTP method of the failed request.
        method: String,
        /// Full URL of the failed request.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a status code the endpoint does not document.
    #[error(
        "DocuSign request failed: {method} {url} returned code {status} while expecting code {expected}; Message: {message}"
    )]
    UnexpectedStatus {
        /// HTTP method of the request.
        method: String,
        /// Full URL of the request.
        url: String,
        /// Status code actually returned.
        status: u16,
        /// Status code the endpoint should have returned.
        expected: u16,
        /// Raw response body.
        message: String,
    },

    /// The OAuth2 token endpoints rejected the request.
    #[error("DocuSign OAuth2 error ({status}): {error}")]
    OAuth2 {
        /// HTTP status code.
        status: u16,
        /// OAuth2 error code, e.g. `invalid_client`.
        error: String,
        /// Optional human-readable description.
        description: Option<String>,
        /// Decoded response body (a JSON string when the body was not JSON).
        body: serde_json::Value,
    },

    /// Reading a response body failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document cannot be framed into a multipart request.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl DocuSignError {
    /// Returns the HTTP status code if the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DocuSignError::UnexpectedStatus { status, .. } => Some(*status),
            DocuSignError::OAuth2 { status, .. } => Some(*status),
            DocuSignError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if DocuSign refused the credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            DocuSignError::OAuth2 { .. }
                | DocuSignError::UnexpectedStatus { status: 401, .. }
                | DocuSignError::UnexpectedStatus { status: 403, .. }
        )
    }

    /// Returns true if this error came from the OAuth2 endpoints.
    pub fn is_oauth2(&self) -> bool {
        matches!(self, DocuSignError::OAuth2 { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unexpected(status: u16) -> DocuSignError {
        DocuSignError::UnexpectedStatus {
            method: "GET".to_string(),
            url: "https://demo.docusign.net/restapi/v2/login_information".to_string(),
            status,
            expected: 200,
            message: "{\"errorCode\":\"USER_AUTHENTICATION_FAILED\"}".to_string(),
        }
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = unexpected(401);
        assert_eq!(
            err.to_string(),
            "DocuSign request failed: GET https://demo.docusign.net/restapi/v2/login_information \
             returned code 401 while expecting code 200; \
             Message: {\"errorCode\":\"USER_AUTHENTICATION_FAILED\"}"
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(unexpected(404).status_code(), Some(404));
        assert_eq!(DocuSignError::Decode("no accounts".into()).status_code(), None);
        assert_eq!(DocuSignError::Config("bad".into()).status_code(), None);
    }

    #[test]
    fn test_is_auth_error() {
        assert!(unexpected(401).is_auth_error());
        assert!(unexpected(403).is_auth_error());
        assert!(!unexpected(500).is_auth_error());

        let oauth = DocuSignError::OAuth2 {
            status: 400,
            error: "invalid_client".to_string(),
            description: None,
            body: serde_json::json!({ "error": "invalid_client" }),
        };
        assert!(oauth.is_auth_error());
        assert!(oauth.is_oauth2());
        assert!(!unexpected(401).is_oauth2());
        assert_eq!(oauth.to_string(), "DocuSign OAuth2 error (400): invalid_client");
    }
}
