//! Template operations.

use crate::client::{Client, RequestOptions};
use crate::error::Result;
use reqwest::Method;
use uuid::Uuid;

/// Client for server-side templates.
///
/// Access via `client.templates()`.
pub struct TemplatesClient {
    client: Client,
}

impl TemplatesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the definition of a template.
    pub async fn get(&self, template_id: &Uuid) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!("/templates/{}", template_id))
            .await?;
        self.client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()
    }
}
