//! Envelope operations.
//!
//! This module provides the EnvelopesClient for creating, reading, sending,
//! voiding and searching envelopes, and for their custom fields.

use crate::client::{Client, PreparedRequest, RequestOptions};
use crate::error::Result;
use crate::multipart;
use crate::types::{Document, Envelope, EnvelopeSearch, EnvelopeStatus, EnvelopeSummary};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use uuid::Uuid;

/// Client for envelope operations.
///
/// Access via `client.envelopes()`. Every call resolves the account context
/// first if the client has not logged in yet.
pub struct EnvelopesClient {
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomFields<'a> {
    text_custom_fields: Option<&'a serde_json::Value>,
    list_custom_fields: Option<&'a serde_json::Value>,
}

impl EnvelopesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_json(&self, envelope_id: &Uuid, suffix: &str) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}{}", envelope_id, suffix))
            .await?;
        self.client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()
    }

    async fn put_status<B: Serialize>(&self, envelope_id: &Uuid, body: &B) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}", envelope_id))
            .await?;
        self.client
            .request(Method::PUT, &path, RequestOptions::json(body)?)
            .await?
            .into_json()
    }

    /// Get an envelope.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::Client;
    /// use uuid::Uuid;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let envelope_id = Uuid::parse_str("...")?;
    ///
    ///     let envelope = client.envelopes().get(&envelope_id).await?;
    ///     println!("Status: {}", envelope["status"]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get(&self, envelope_id: &Uuid) -> Result<serde_json::Value> {
        self.get_json(envelope_id, "").await
    }

    /// Get the reminder and expiration settings of an envelope.
    pub async fn get_notification(&self, envelope_id: &Uuid) -> Result<serde_json::Value> {
        self.get_json(envelope_id, "/notification").await
    }

    /// Get the custom fields of an envelope.
    pub async fn get_custom_fields(&self, envelope_id: &Uuid) -> Result<serde_json::Value> {
        self.get_json(envelope_id, "/custom_fields").await
    }

    /// Add custom fields to an envelope. Expects 201.
    pub async fn post_custom_fields(
        &self,
        envelope_id: &Uuid,
        text_custom_fields: Option<&serde_json::Value>,
        list_custom_fields: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.write_custom_fields(Method::POST, envelope_id, text_custom_fields, list_custom_fields)
            .await
    }

    /// Update custom fields of an envelope. Expects 201.
    pub async fn put_custom_fields(
        &self,
        envelope_id: &Uuid,
        text_custom_fields: Option<&serde_json::Value>,
        list_custom_fields: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.write_custom_fields(Method::PUT, envelope_id, text_custom_fields, list_custom_fields)
            .await
    }

    async fn write_custom_fields(
        &self,
        method: Method,
        envelope_id: &Uuid,
        text_custom_fields: Option<&serde_json::Value>,
        list_custom_fields: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/custom_fields", envelope_id))
            .await?;
        let body = CustomFields {
            text_custom_fields,
            list_custom_fields,
        };
        self.client
            .request(
                method,
                &path,
                RequestOptions::json(&body)?.expect(StatusCode::CREATED),
            )
            .await?
            .into_json()
    }

    /// Void an envelope.
    pub async fn void(&self, envelope_id: &Uuid, reason: Option<&str>) -> Result<serde_json::Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Request<'a> {
            status: EnvelopeStatus,
            voided_reason: Option<&'a str>,
        }

        self.put_status(
            envelope_id,
            &Request {
                status: EnvelopeStatus::Voided,
                voided_reason: reason,
            },
        )
        .await
    }

    /// Send a draft envelope.
    pub async fn send(&self, envelope_id: &Uuid) -> Result<serde_json::Value> {
        #[derive(Serialize)]
        struct Request {
            status: EnvelopeStatus,
        }

        self.put_status(
            envelope_id,
            &Request {
                status: EnvelopeStatus::Sent,
            },
        )
        .await
    }

    /// Move envelopes to the recycle bin.
    ///
    /// Drafts are deleted, in-process envelopes are voided.
    pub async fn delete(&self, envelope_ids: &[Uuid]) -> Result<serde_json::Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Request<'a> {
            envelope_ids: &'a [Uuid],
        }

        let path = self.client.account_path("/folders/recyclebin").await?;
        self.client
            .request(Method::PUT, &path, RequestOptions::json(&Request { envelope_ids })?)
            .await?
            .into_json()
    }

    /// Search envelopes of the account.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::{Client, EnvelopeSearch};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let found = client.envelopes().search(&EnvelopeSearch {
    ///         custom_field: Some(("order".to_string(), "42".to_string())),
    ///         status: Some("completed".to_string()),
    ///         ..Default::default()
    ///     }).await?;
    ///     println!("{}", found["resultSetSize"]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn search(&self, query: &EnvelopeSearch) -> Result<serde_json::Value> {
        let path = self.client.account_path("/envelopes").await?;
        let options = RequestOptions {
            query: query.params(),
            ..Default::default()
        };
        self.client
            .request(Method::GET, &path, options)
            .await?
            .into_json()
    }

    /// Build the multipart request creating `envelope` with its documents.
    ///
    /// Nothing is sent; use [`EnvelopesClient::create_from_document`] for that.
    pub async fn prepare_from_document(&self, envelope: &Envelope) -> Result<PreparedRequest> {
        self.prepare(envelope, true).await
    }

    /// Build the multipart request creating `envelope` from its template.
    pub async fn prepare_from_template(&self, envelope: &Envelope) -> Result<PreparedRequest> {
        self.prepare(envelope, false).await
    }

    async fn prepare(&self, envelope: &Envelope, with_documents: bool) -> Result<PreparedRequest> {
        let account = self.client.ensure_account().await?;
        let json = serde_json::to_string(envelope)?;
        let documents: &[Document] = if with_documents {
            envelope.documents.as_slice()
        } else {
            &[]
        };

        Ok(PreparedRequest {
            url: format!("{}/envelopes", account.account_url),
            headers: self
                .client
                .multipart_headers(envelope.sobo_email.as_deref(), multipart::CONTENT_TYPE)?,
            body: multipart::envelope_body(&json, documents)?,
        })
    }

    /// Create an envelope from uploaded documents. Expects 201.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use docusign::{Client, Document, Envelope, Recipients, SignHereTab, Signer, Tabs};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let pdf = std::fs::read("contract.pdf")?;
    ///
    ///     let envelope = Envelope {
    ///         email_subject: "Please sign".to_string(),
    ///         documents: vec![Document::pdf(1, "contract.pdf", pdf)],
    ///         recipients: Recipients {
    ///             signers: vec![Signer {
    ///                 email: "signer@example.com".to_string(),
    ///                 name: "Signer".to_string(),
    ///                 recipient_id: Some("1".to_string()),
    ///                 tabs: Tabs {
    ///                     sign_here_tabs: vec![SignHereTab::default()],
    ///                     ..Default::default()
    ///                 },
    ///                 ..Default::default()
    ///             }],
    ///         },
    ///         ..Default::default()
    ///     };
    ///
    ///     let created = client.envelopes().create_from_document(&envelope).await?;
    ///     println!("Envelope: {}", created.envelope_id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_from_document(&self, envelope: &Envelope) -> Result<EnvelopeSummary> {
        let prepared = self.prepare_from_document(envelope).await?;
        self.client.send_multipart(prepared, StatusCode::CREATED).await
    }

    /// Create an envelope from a server-side template. Expects 201.
    pub async fn create_from_template(&self, envelope: &Envelope) -> Result<EnvelopeSummary> {
        let prepared = self.prepare_from_template(envelope).await?;
        self.client.send_multipart(prepared, StatusCode::CREATED).await
    }
}
