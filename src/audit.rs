//! Envelope audit events.
//!
//! This module provides the AuditClient. DocuSign returns each event as a list
//! of `{name, value}` pairs; they are flattened into [`AuditEvent`] maps.

use crate::client::{Client, RequestOptions};
use crate::error::Result;
use crate::types::AuditEvent;
use reqwest::Method;
use serde::Deserialize;
use uuid::Uuid;

/// Client for envelope audit events.
///
/// Access via `client.audit()`.
pub struct AuditClient {
    client: Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditEventsResponse {
    #[serde(default)]
    audit_events: Vec<RawAuditEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuditEvent {
    #[serde(default)]
    event_fields: Vec<EventField>,
}

#[derive(Deserialize)]
struct EventField {
    name: String,
    value: Option<String>,
}

impl From<RawAuditEvent> for AuditEvent {
    fn from(raw: RawAuditEvent) -> Self {
        AuditEvent {
            fields: raw
                .event_fields
                .into_iter()
                .filter_map(|field| field.value.map(|value| (field.name, value)))
                .collect(),
        }
    }
}

impl AuditClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the audit events of an envelope, oldest first.
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
    ///     for event in client.audit().events(&envelope_id).await? {
    ///         println!(
    ///             "[{}] {} by {}",
    ///             event.get("logTime").unwrap_or("-"),
    ///             event.get("Action").unwrap_or("-"),
    ///             event.get("UserName").unwrap_or("-"),
    ///         );
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn events(&self, envelope_id: &Uuid) -> Result<Vec<AuditEvent>> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/audit_events", envelope_id))
            .await?;
        let response: AuditEventsResponse = self
            .client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()?;

        Ok(response.audit_events.into_iter().map(AuditEvent::from).collect())
    }
}
