//! Login and account operations.
//!
//! This module provides the AccountsClient. [`AccountsClient::login_information`]
//! is also what resolves the account context the other clients are scoped to.

use crate::auth::{header_value, APP_TOKEN_HEADER};
use crate::client::{AccountContext, Client, RequestOptions};
use crate::error::{DocuSignError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;

/// Client for login and account operations.
///
/// Access via `client.accounts()`.
pub struct AccountsClient {
    client: Client,
}

impl AccountsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `GET /login_information`.
    ///
    /// Caches the first login account's ID and URL on the client.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let login = client.accounts().login_information().await?;
    ///     println!("Logged in as {}", login["loginAccounts"][0]["userName"]);
    ///
    ///     let account = client.account().await.unwrap();
    ///     println!("Account URL: {}", account.account_url);
    ///     Ok(())
    /// }
    /// ```
    pub async fn login_information(&self) -> Result<serde_json::Value> {
        let data: serde_json::Value = self
            .client
            .request(Method::GET, "/login_information", RequestOptions::default())
            .await?
            .into_json()?;

        let account_id = data["loginAccounts"][0]["accountId"]
            .as_str()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                DocuSignError::Decode("login_information returned no login account".to_string())
            })?;

        self.client
            .set_account(AccountContext::new(self.client.root_url(), account_id))
            .await;

        Ok(data)
    }

    /// `GET /accounts/{accountId}`.
    ///
    /// Uses the resolved account when `account_id` is `None`.
    pub async fn get_account_information(
        &self,
        account_id: Option<&str>,
    ) -> Result<serde_json::Value> {
        let path = match account_id {
            Some(id) => format!("/accounts/{}", id),
            None => self.client.account_path("").await?,
        };
        self.client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()
    }

    /// `GET /accounts/provisioning`, authenticated with the AppToken.
    pub async fn get_account_provisioning(&self) -> Result<serde_json::Value> {
        let mut headers = HeaderMap::new();
        headers.insert(
            APP_TOKEN_HEADER,
            header_value(self.client.app_token().unwrap_or_default())?,
        );

        self.client
            .request(
                Method::GET,
                "/accounts/provisioning",
                RequestOptions {
                    headers,
                    ..Default::default()
                },
            )
            .await?
            .into_json()
    }

    /// Create an account. `POST /accounts`, expects 201.
    pub async fn post_account<B: Serialize>(&self, data: &B) -> Result<serde_json::Value> {
        self.client
            .request(
                Method::POST,
                "/accounts",
                RequestOptions::json(data)?.expect(StatusCode::CREATED),
            )
            .await?
            .into_json()
    }

    /// Delete an account. Returns true when DocuSign answered with an empty
    /// body.
    pub async fn delete_account(&self, account_id: &str) -> Result<bool> {
        let body = self
            .client
            .request(
                Method::DELETE,
                &format!("/accounts/{}", account_id),
                RequestOptions::default(),
            )
            .await?
            .into_text();
        Ok(body.trim().is_empty())
    }
}
