//! Recipient operations.

use crate::client::{Client, RequestOptions};
use crate::error::Result;
use crate::types::RecipientViewRequest;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use uuid::Uuid;

/// Client for envelope recipients and embedded signing.
///
/// Access via `client.recipients()`.
pub struct RecipientsClient {
    client: Client,
}

impl RecipientsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the recipients of an envelope.
    pub async fn list(&self, envelope_id: &Uuid) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/recipients", envelope_id))
            .await?;
        self.client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()
    }

    /// Update the recipients of an envelope.
    ///
    /// `params` go to the query string, e.g. `[("resend_envelope", "true")]`.
    pub async fn update<B: Serialize>(
        &self,
        envelope_id: &Uuid,
        data: &B,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/recipients", envelope_id))
            .await?;
        let options = params
            .iter()
            .fold(RequestOptions::json(data)?, |options, (name, value)| {
                options.query(*name, *value)
            });
        self.client
            .request(Method::PUT, &path, options)
            .await?
            .into_json()
    }

    /// Start an embedded signing session. Expects 201.
    ///
    /// `authentication_method` defaults to `none` when left empty. The
    /// response carries the signing URL.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::{Client, RecipientViewRequest};
    /// use uuid::Uuid;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let view = client.recipients().create_view(RecipientViewRequest {
    ///         client_user_id: "user-1".to_string(),
    ///         email: "signer@example.com".to_string(),
    ///         envelope_id: Uuid::parse_str("...")?,
    ///         return_url: "https://example.com/signed".to_string(),
    ///         user_name: "Signer".to_string(),
    ///         ..Default::default()
    ///     }).await?;
    ///     println!("Sign at {}", view["url"]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_view(&self, mut request: RecipientViewRequest) -> Result<serde_json::Value> {
        if request.authentication_method.is_empty() {
            request.authentication_method = "none".to_string();
        }
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/views/recipient", request.envelope_id))
            .await?;
        self.client
            .request(
                Method::POST,
                &path,
                RequestOptions::json(&request)?.expect(StatusCode::CREATED),
            )
            .await?
            .into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_request_serialization() {
        let request = RecipientViewRequest {
            authentication_method: "none".to_string(),
            client_user_id: "1".to_string(),
            email: "signer@example.com".to_string(),
            envelope_id: Uuid::parse_str("4b728be4-4d7a-4e5d-8f87-2a4d0b6f3c10").unwrap(),
            return_url: "https://example.com".to_string(),
            user_id: String::new(),
            user_name: "Signer".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "authenticationMethod": "none",
                "clientUserId": "1",
                "email": "signer@example.com",
                "envelopeId": "4b728be4-4d7a-4e5d-8f87-2a4d0b6f3c10",
                "returnUrl": "https://example.com",
                "userId": "",
                "userName": "Signer"
            })
        );
    }
}
