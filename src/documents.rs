//! Envelope document operations.
//!
//! Downloads are streamed: [`DocumentDownload`] hands out the body chunk by
//! chunk instead of buffering whole PDFs.

use crate::auth::header_value;
use crate::client::{Client, RequestBody, RequestOptions};
use crate::error::{DocuSignError, Result};
use crate::types::UploadDocument;
use reqwest::header::{self, HeaderMap};
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

/// Client for envelope documents.
///
/// Access via `client.documents()`.
pub struct DocumentsClient {
    client: Client,
}

/// A document being downloaded.
#[derive(Debug)]
pub struct DocumentDownload {
    response: reqwest::Response,
}

impl DocumentDownload {
    /// `Content-Type` announced by DocuSign.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Size announced by DocuSign, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Next chunk of the body, `None` once exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.response.chunk().await?.map(|bytes| bytes.to_vec()))
    }

    /// Read the remaining body at once.
    pub async fn bytes(self) -> Result<Vec<u8>> {
        Ok(self.response.bytes().await?.to_vec())
    }
}

impl DocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the documents of an envelope (the `envelopeDocuments` array).
    pub async fn list(&self, envelope_id: &Uuid) -> Result<Vec<serde_json::Value>> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/documents", envelope_id))
            .await?;
        let mut data: serde_json::Value = self
            .client
            .request(Method::GET, &path, RequestOptions::default())
            .await?
            .into_json()?;

        match data.get_mut("envelopeDocuments").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(documents)) => Ok(documents),
            _ => Err(DocuSignError::Decode(
                "response has no envelopeDocuments array".to_string(),
            )),
        }
    }

    /// Download one document of an envelope.
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
    ///     let mut download = client.documents().get(&envelope_id, "1").await?;
    ///     let mut size = 0;
    ///     while let Some(chunk) = download.chunk().await? {
    ///         size += chunk.len();
    ///     }
    ///     println!("Downloaded {} bytes", size);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get(&self, envelope_id: &Uuid, document_id: &str) -> Result<DocumentDownload> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/documents/{}", envelope_id, document_id))
            .await?;
        let response = self
            .client
            .request_raw(Method::GET, &path, RequestOptions::default())
            .await?;
        Ok(DocumentDownload { response })
    }

    /// Download all documents of an envelope merged into one PDF.
    ///
    /// `certificate` appends the signing certificate, `watermark` stamps
    /// unfinished envelopes.
    pub async fn download_combined(
        &self,
        envelope_id: &Uuid,
        watermark: bool,
        certificate: bool,
    ) -> Result<DocumentDownload> {
        let path = self
            .client
            .account_path(&format!("/envelopes/{}/documents/combined", envelope_id))
            .await?;
        let options = RequestOptions::default()
            .query("watermark", watermark.to_string())
            .query("certificate", certificate.to_string());
        let response = self.client.request_raw(Method::GET, &path, options).await?;
        Ok(DocumentDownload { response })
    }

    /// Upload a document into an existing envelope, replacing any document
    /// with the same ID.
    pub async fn upload(&self, envelope_id: &Uuid, document: UploadDocument) -> Result<serde_json::Value> {
        let path = self
            .client
            .account_path(&format!(
                "/envelopes/{}/documents/{}",
                envelope_id, document.document_id
            ))
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&format!("filename=\"{}\"", document.filename))?,
        );
        headers.insert(header::CONTENT_TYPE, header_value(&document.content_type)?);

        let options = RequestOptions {
            headers,
            body: RequestBody::Bytes(document.content),
            ..Default::default()
        };
        self.client
            .request(Method::PUT, &path, options)
            .await?
            .into_json()
    }

    /// Remove documents from a draft envelope.
    pub async fn delete(&self, envelope_id: &Uuid, document_ids: &[&str]) -> Result<serde_json::Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DocumentRef<'a> {
            document_id: &'a str,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            #[serde(skip_serializing_if = "Vec::is_empty")]
            documents: Vec<DocumentRef<'a>>,
        }

        let path = self
            .client
            .account_path(&format!("/envelopes/{}/documents", envelope_id))
            .await?;
        let request = Request {
            documents: document_ids
                .iter()
                .map(|id| DocumentRef { document_id: id })
                .collect(),
        };
        self.client
            .request(Method::DELETE, &path, RequestOptions::json(&request)?)
            .await?
            .into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PDF_CONTENT_TYPE;

    #[test]
    fn test_upload_document_default() {
        let document = UploadDocument::default();
        assert_eq!(document.document_id, 1);
        assert_eq!(document.content_type, PDF_CONTENT_TYPE);
        assert!(document.content.is_empty());
    }
}
