//! Authentication: request headers for each auth mode, and the OAuth2
//! password-grant token endpoints.

use crate::client::{build_http, default_user_agent};
use crate::config::default_timeout;
use crate::error::{DocuSignError, Result};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Header carrying legacy JSON credentials.
pub const AUTHENTICATION_HEADER: HeaderName = HeaderName::from_static("x-docusign-authentication");
/// Header naming the user to act as when using OAuth2 (SOBO).
pub const ACT_AS_USER_HEADER: HeaderName = HeaderName::from_static("x-docusign-act-as-user");
/// Header carrying the AppToken for account provisioning.
pub const APP_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-docusign-apptoken");

/// How requests are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username, password and integrator key sent as a JSON header.
    Legacy {
        /// API username.
        username: String,
        /// API password.
        password: String,
        /// Integrator key.
        integrator_key: String,
    },
    /// OAuth2 bearer token.
    OAuth2 {
        /// Access token.
        token: String,
    },
}

// Secrets stay out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Legacy {
                username,
                integrator_key,
                ..
            } => f
                .debug_struct("Legacy")
                .field("username", username)
                .field("password", &"***")
                .field("integrator_key", integrator_key)
                .finish(),
            Credentials::OAuth2 { .. } => f.debug_struct("OAuth2").field("token", &"***").finish(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyAuthentication<'a> {
    username: &'a str,
    password: &'a str,
    integrator_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_on_behalf_of: Option<&'a str>,
}

impl Credentials {
    /// Base headers for every request.
    ///
    /// `sobo_email`, when set, asks DocuSign to act on behalf of that user. The
    /// authenticated account needs the matching permission.
    pub fn headers(&self, sobo_email: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        match self {
            Credentials::OAuth2 { token } => {
                headers.insert(
                    header::AUTHORIZATION,
                    header_value(&format!("Bearer {}", token))?,
                );
                if let Some(email) = sobo_email {
                    headers.insert(ACT_AS_USER_HEADER, header_value(email)?);
                }
            }
            Credentials::Legacy {
                username,
                password,
                integrator_key,
            } => {
                let auth = serde_json::to_string(&LegacyAuthentication {
                    username,
                    password,
                    integrator_key,
                    send_on_behalf_of: sobo_email,
                })?;
                headers.insert(AUTHENTICATION_HEADER, header_value(&auth)?);
            }
        }

        Ok(headers)
    }
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| DocuSignError::Config(format!("invalid header value: {}", e)))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct OAuth2ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange username/password for an OAuth2 access token.
///
/// Uses the password grant on `{root_url}/oauth2/token` with the integrator
/// key as client ID.
///
/// # Example
///
/// ```rust,no_run
/// use docusign::{auth, Client, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let root = "https://demo.docusign.net/restapi/v2";
///     let token = auth::request_token(root, "me@example.com", "secret", "integrator-key").await?;
///
///     let client = Client::new(root, Credentials::OAuth2 { token: token.clone() })?;
///     client.accounts().login_information().await?;
///
///     auth::revoke_token(root, &token).await?;
///     Ok(())
/// }
/// ```
pub async fn request_token(
    root_url: &str,
    username: &str,
    password: &str,
    integrator_key: &str,
) -> Result<String> {
    let url = format!("{}/oauth2/token", root_url);
    let form = [
        ("grant_type", "password"),
        ("client_id", integrator_key),
        ("username", username),
        ("password", password),
        ("scope", "api"),
    ];

    let response = post_form(&url, &form).await?;
    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

/// Revoke an OAuth2 access token.
pub async fn revoke_token(root_url: &str, token: &str) -> Result<()> {
    let url = format!("{}/oauth2/revoke", root_url);
    post_form(&url, &[("token", token)]).await?;
    Ok(())
}

async fn post_form(url: &str, form: &[(&str, &str)]) -> Result<reqwest::Response> {
    debug!(url = %url, "POST oauth2 request");

    let response = build_http(default_timeout(), &default_user_agent())?
        .post(url)
        .header(header::ACCEPT, "application/json")
        .form(form)
        .send()
        .await
        .map_err(|source| {
            error!(method = "POST", url = %url, error = %source, "DocuSign request error");
            DocuSignError::Transport {
                method: "POST".to_string(),
                url: url.to_string(),
                source,
            }
        })?;

    if response.status() == reqwest::StatusCode::OK {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let err = oauth2_error(status, &text);
    error!(url = %url, status, error = %err, "oauth2 request rejected");
    Err(err)
}

fn oauth2_error(status: u16, text: &str) -> DocuSignError {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(body) => {
            let parsed: Option<OAuth2ErrorBody> = serde_json::from_value(body.clone()).ok();
            let (error, description) = parsed
                .map(|p| (p.error, p.error_description))
                .unwrap_or((None, None));
            DocuSignError::OAuth2 {
                status,
                error: error.unwrap_or_else(|| "unknown".to_string()),
                description,
                body,
            }
        }
        Err(_) => DocuSignError::OAuth2 {
            status,
            error: "unknown".to_string(),
            description: None,
            body: serde_json::Value::String(text.to_string()),
        },
    }
}
