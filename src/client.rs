//! DocuSign API client.
//!
//! The main entry point. Every endpoint goes through [`Client::request`], except
//! multipart envelope creation which has its own low-level call.

use crate::accounts::AccountsClient;
use crate::audit::AuditClient;
use crate::auth::{header_value, Credentials};
use crate::config::{default_timeout, parse_timeout, ClientConfig};
use crate::documents::DocumentsClient;
use crate::envelopes::EnvelopesClient;
use crate::error::{DocuSignError, Result};
use crate::recipients::RecipientsClient;
use crate::templates::TemplatesClient;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

/// DocuSign API client.
///
/// Clones share the resolved account context.
///
/// # Example
///
/// ```rust,no_run
/// use docusign::{Client, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new(
///         "https://demo.docusign.net/restapi/v2",
///         Credentials::Legacy {
///             username: "me@example.com".to_string(),
///             password: "secret".to_string(),
///             integrator_key: "integrator-key".to_string(),
///         },
///     )?;
///
///     let login = client.accounts().login_information().await?;
///     println!("{}", login["loginAccounts"][0]["name"]);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    pub(crate) http: HttpClient,
    root_url: String,
    credentials: Credentials,
    app_token: Option<String>,
    timeout: Duration,
    user_agent: String,
    account: Arc<RwLock<Option<AccountContext>>>,
}

/// The account requests are scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    /// Account ID.
    pub account_id: String,
    /// Absolute URL of the account, `{root_url}/accounts/{account_id}`.
    pub account_url: String,
}

impl AccountContext {
    pub(crate) fn new(root_url: &str, account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            account_url: format!("{}/accounts/{}", root_url, account_id),
        }
    }
}

/// Body of a request sent through [`Client::request`].
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(serde_json::Value),
    /// Raw bytes, e.g. a document upload.
    Bytes(Vec<u8>),
}

/// Per-call options for [`Client::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Headers overriding the base headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: RequestBody,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// The only status code accepted as success.
    pub expected_status: StatusCode,
    /// Act on behalf of this user.
    pub sobo_email: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            query: Vec::new(),
            expected_status: StatusCode::OK,
            sobo_email: None,
        }
    }
}

impl RequestOptions {
    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize>(body: &B) -> Result<Self> {
        Ok(Self {
            body: RequestBody::Json(serde_json::to_value(body)?),
            ..Default::default()
        })
    }

    /// Accept `status` instead of 200.
    pub fn expect(mut self, status: StatusCode) -> Self {
        self.expected_status = status;
        self
    }

    /// Add a query string parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The response declared `application/json`.
    Json(serde_json::Value),
    /// Anything else, as text.
    Text(String),
}

impl ResponseBody {
    /// Decode into `T`. Text bodies are parsed as JSON.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }

    /// The body as text, JSON bodies re-encoded.
    pub fn into_text(self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text,
        }
    }
}

/// A fully built request, ready to be sent.
///
/// Envelope creation exposes this so callers can inspect what would go on the
/// wire.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Absolute URL.
    pub url: String,
    /// All request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Vec<u8>,
}

impl Client {
    /// Create a client for `root_url` with the given credentials.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::{Client, Credentials};
    ///
    /// let client = Client::new(
    ///     "https://demo.docusign.net/restapi/v2",
    ///     Credentials::OAuth2 { token: "access-token".to_string() },
    /// ).unwrap();
    /// ```
    pub fn new(root_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let root_url = root_url.into();
        Self::build(
            root_url,
            credentials,
            None,
            None,
            default_timeout(),
            default_user_agent(),
        )
    }

    /// Create a client from a configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(ClientConfig {
    ///     root_url: Some("https://demo.docusign.net/restapi/v2".to_string()),
    ///     oauth2_token: Some("access-token".to_string()),
    ///     account_id: Some("1703061".to_string()),
    ///     timeout: Some(Duration::from_secs(60)),
    ///     ..Default::default()
    /// }).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let credentials = config.credentials();
        let root_url = config.root_url.unwrap_or_default();

        let account = config
            .account_id
            .filter(|id| !id.is_empty())
            .map(|account_id| AccountContext {
                account_url: config
                    .account_url
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| format!("{}/accounts/{}", root_url, account_id)),
                account_id,
            });

        Self::build(
            root_url,
            credentials,
            config.app_token.filter(|t| !t.is_empty()),
            account,
            config.timeout.unwrap_or_else(default_timeout),
            config.user_agent.unwrap_or_else(default_user_agent),
        )
    }

    /// Create a client from the `DOCUSIGN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    fn build(
        root_url: String,
        credentials: Credentials,
        app_token: Option<String>,
        account: Option<AccountContext>,
        timeout: Duration,
        user_agent: String,
    ) -> Result<Self> {
        let http = build_http(timeout, &user_agent)?;

        Ok(Self {
            http,
            root_url,
            credentials,
            app_token,
            timeout,
            user_agent,
            account: Arc::new(RwLock::new(account)),
        })
    }

    /// Root URL of the API.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Credentials used for every request.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// AppToken used for account provisioning.
    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    /// Connection timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Change the connection timeout, in seconds.
    ///
    /// Precision is limited to milliseconds; values under 0.001 are rejected.
    pub fn set_timeout(&mut self, secs: f64) -> Result<()> {
        let timeout = parse_timeout(secs)?;
        self.http = build_http(timeout, &self.user_agent)?;
        self.timeout = timeout;
        Ok(())
    }

    /// The resolved account context, if any.
    pub async fn account(&self) -> Option<AccountContext> {
        self.account.read().await.clone()
    }

    pub(crate) async fn set_account(&self, context: AccountContext) {
        info!(account_id = %context.account_id, "account context resolved");
        *self.account.write().await = Some(context);
    }

    /// Return the cached account context, logging in first if needed.
    pub async fn ensure_account(&self) -> Result<AccountContext> {
        if let Some(context) = self.account.read().await.clone() {
            return Ok(context);
        }
        self.accounts().login_information().await?;
        self.account
            .read()
            .await
            .clone()
            .ok_or_else(|| DocuSignError::Decode("login did not resolve an account".to_string()))
    }

    /// Account-scoped path, `/accounts/{account_id}{suffix}`.
    pub(crate) async fn account_path(&self, suffix: &str) -> Result<String> {
        let context = self.ensure_account().await?;
        Ok(format!("/accounts/{}{}", context.account_id, suffix))
    }

    /// Get the accounts client for login and account operations.
    pub fn accounts(&self) -> AccountsClient {
        AccountsClient::new(self.clone())
    }

    /// Get the envelopes client.
    pub fn envelopes(&self) -> EnvelopesClient {
        EnvelopesClient::new(self.clone())
    }

    /// Get the recipients client.
    pub fn recipients(&self) -> RecipientsClient {
        RecipientsClient::new(self.clone())
    }

    /// Get the documents client.
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.clone())
    }

    /// Get the templates client.
    pub fn templates(&self) -> TemplatesClient {
        TemplatesClient::new(self.clone())
    }

    /// Get the audit client for envelope audit events.
    pub fn audit(&self) -> AuditClient {
        AuditClient::new(self.clone())
    }

    /// Base headers plus `extra`, which wins on conflicts.
    pub(crate) fn headers(&self, sobo_email: Option<&str>, extra: HeaderMap) -> Result<HeaderMap> {
        let mut headers = self.credentials.headers(sobo_email)?;
        for (name, value) in extra {
            if let Some(name) = name {
                headers.insert(name, value);
            }
        }
        Ok(headers)
    }

    /// Perform an authenticated request against `{root_url}{path}`.
    ///
    /// Fails with [`DocuSignError::UnexpectedStatus`] unless the response
    /// status equals `options.expected_status`.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody> {
        let response = self.request_raw(method, path, options).await?;
        decode(response).await
    }

    /// Perform an authenticated request and hand back the raw response, for
    /// streaming downloads. The status is checked against
    /// `options.expected_status`.
    pub(crate) async fn request_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response> {
        let expected = options.expected_status;
        let response = self.send(method.clone(), path, options).await?;

        if response.status() != expected {
            let url = response.url().to_string();
            return Err(unexpected_status(method.as_str(), &url, expected, response).await);
        }
        Ok(response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.root_url, path);
        let headers = self.headers(options.sobo_email.as_deref(), options.headers)?;

        debug!(method = %method, url = %url, "DocuSign request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Bytes(bytes) => builder.body(bytes),
        };

        builder.send().await.map_err(|source| {
            error!(method = %method, url = %url, error = %source, "DocuSign request error");
            DocuSignError::Transport {
                method: method.to_string(),
                url,
                source,
            }
        })
    }

    /// POST a prepared multipart request. Returns the decoded JSON response.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        prepared: PreparedRequest,
        expected: StatusCode,
    ) -> Result<T> {
        debug!(url = %prepared.url, bytes = prepared.body.len(), "DocuSign multipart request");

        let response = self
            .http
            .post(&prepared.url)
            .headers(prepared.headers)
            .body(prepared.body)
            .send()
            .await
            .map_err(|source| {
                error!(url = %prepared.url, error = %source, "DocuSign request error");
                DocuSignError::Transport {
                    method: "POST".to_string(),
                    url: prepared.url.clone(),
                    source,
                }
            })?;

        if response.status() != expected {
            return Err(unexpected_status("POST", &prepared.url, expected, response).await);
        }

        Ok(response.json().await?)
    }

    /// Headers for a multipart request: base headers with the multipart type.
    pub(crate) fn multipart_headers(&self, sobo_email: Option<&str>, content_type: &str) -> Result<HeaderMap> {
        let mut extra = HeaderMap::new();
        extra.insert(header::CONTENT_TYPE, header_value(content_type)?);
        self.headers(sobo_email, extra)
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("docusign-rust/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn build_http(timeout: Duration, user_agent: &str) -> Result<HttpClient> {
    HttpClient::builder()
        .connect_timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| DocuSignError::Config(format!("failed to create HTTP client: {}", e)))
}

async fn unexpected_status(
    method: &str,
    url: &str,
    expected: StatusCode,
    response: reqwest::Response,
) -> DocuSignError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    error!(
        method,
        url,
        status,
        expected = expected.as_u16(),
        "DocuSign request failed"
    );
    DocuSignError::UnexpectedStatus {
        method: method.to_string(),
        url: url.to_string(),
        status,
        expected: expected.as_u16(),
        message,
    }
}

async fn decode(response: reqwest::Response) -> Result<ResponseBody> {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let bytes = response.bytes().await?;
    if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
        Ok(ResponseBody::Json(serde_json::from_slice(&bytes)?))
    } else {
        Ok(ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
