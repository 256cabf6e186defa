//! Request and response types.
//!
//! Field names follow DocuSign's camelCase JSON. Only the models this crate
//! builds or inspects are typed; everything else is returned as
//! [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Default content type of envelope documents.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Envelope status sent on creation or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Send immediately.
    #[default]
    Sent,
    /// Save as draft.
    Created,
    /// Voided.
    Voided,
}

impl EnvelopeStatus {
    /// Alias used by DocuSign for draft envelopes.
    pub const DRAFT: EnvelopeStatus = EnvelopeStatus::Created;
}

/// Placeholder where a recipient signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignHereTab {
    /// Document the tab is placed on.
    pub document_id: u32,
    /// Page the tab is affixed to.
    pub page_number: u32,
    /// Horizontal offset from the left.
    pub x_position: u32,
    /// Vertical offset from the top.
    pub y_position: u32,
}

impl Default for SignHereTab {
    fn default() -> Self {
        Self {
            document_id: 1,
            page_number: 1,
            x_position: 0,
            y_position: 0,
        }
    }
}

/// Placeholder where a recipient approves the document.
pub type ApproveTab = SignHereTab;

/// Tabs attached to a signer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tabs {
    /// Signature placeholders.
    #[serde(default)]
    pub sign_here_tabs: Vec<SignHereTab>,
    /// Approval placeholders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approve_tabs: Vec<ApproveTab>,
}

/// A recipient who must sign the envelope's documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    /// Set for embedded signing; `None` means DocuSign emails the signer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_user_id: Option<String>,
    /// Email of the recipient (max 100 characters).
    pub email: String,
    /// Full legal name (max 100 characters).
    pub name: String,
    /// Recipient ID, unique within the envelope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    /// Signing order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_order: Option<u32>,
    /// Code the recipient must enter before signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    /// Tabs for this signer.
    #[serde(default)]
    pub tabs: Tabs,
}

/// A template role filled in when creating an envelope from a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Email of the recipient.
    pub email: String,
    /// Name of the recipient.
    pub name: String,
    /// Role name as defined in the template.
    pub role_name: String,
    /// Set for embedded signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_user_id: Option<String>,
}

/// A document uploaded along with an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document ID, unique within the envelope.
    pub document_id: u32,
    /// File name (max 100 characters).
    pub name: String,
    /// MIME type of `content`.
    #[serde(skip)]
    pub content_type: String,
    /// Raw file bytes.
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl Document {
    /// A PDF document.
    pub fn pdf(document_id: u32, name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            document_id,
            name: name.into(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            content,
        }
    }
}

/// Callback configuration for envelope status changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNotification {
    /// Callback URL.
    pub url: String,
    /// Keep a log of callback deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_enabled: Option<bool>,
    /// Retry until the callback is acknowledged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_acknowledgment: Option<bool>,
    /// Include signed documents in the callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_documents: Option<bool>,
    /// Envelope events that trigger the callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_events: Option<serde_json::Value>,
    /// Recipient events that trigger the callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_events: Option<serde_json::Value>,
}

/// Recipients of an envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recipients {
    /// Signers.
    pub signers: Vec<Signer>,
}

impl Recipients {
    fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

/// An envelope to create, either from uploaded documents or from a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Status on creation.
    pub status: EnvelopeStatus,
    /// Subject of the notification email.
    pub email_subject: String,
    /// Body of the notification email.
    pub email_blurb: String,
    /// Documents, only for document-based envelopes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<Document>,
    /// Recipients, only for document-based envelopes.
    #[serde(skip_serializing_if = "Recipients::is_empty")]
    pub recipients: Recipients,
    /// Template to instantiate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    /// Roles of the template, in routing order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_roles: Vec<Role>,
    /// Status callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_notification: Option<EventNotification>,
    /// Send on behalf of this user. Sent as a header, never in the body.
    #[serde(skip)]
    pub sobo_email: Option<String>,
}

/// Response to envelope creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    /// ID of the new envelope.
    pub envelope_id: Uuid,
    /// Status of the new envelope.
    #[serde(default)]
    pub status: Option<String>,
    /// Timestamp of the status.
    #[serde(default)]
    pub status_date_time: Option<String>,
    /// Relative URI of the envelope.
    #[serde(default)]
    pub uri: Option<String>,
}

/// Filters for envelope search.
#[derive(Debug, Clone)]
pub struct EnvelopeSearch {
    /// Earliest date, in DocuSign's `M/D/YYYY` format.
    pub from_date: String,
    /// Custom field name and value; ignored unless both are non-empty.
    pub custom_field: Option<(String, String)>,
    /// Envelope status filter.
    pub status: Option<String>,
}

impl Default for EnvelopeSearch {
    fn default() -> Self {
        Self {
            from_date: "1/1/1900".to_string(),
            custom_field: None,
            status: None,
        }
    }
}

impl EnvelopeSearch {
    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("from_date".to_string(), self.from_date.clone())];
        if let Some((name, value)) = &self.custom_field {
            if !name.is_empty() && !value.is_empty() {
                params.push(("custom_field".to_string(), format!("{}={}", name, value)));
            }
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            params.push(("status".to_string(), status.to_string()));
        }
        params
    }
}

/// Parameters of an embedded signing session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientViewRequest {
    /// How the recipient was authenticated by the caller (default: `none`).
    pub authentication_method: String,
    /// Client user ID the signer was created with.
    pub client_user_id: String,
    /// Signer email.
    pub email: String,
    /// Envelope to sign.
    pub envelope_id: Uuid,
    /// URL DocuSign redirects to once signing ends.
    pub return_url: String,
    /// DocuSign user ID of the recipient.
    pub user_id: String,
    /// Signer name.
    pub user_name: String,
}

/// A document uploaded into an existing envelope.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    /// Document ID within the envelope.
    pub document_id: u32,
    /// MIME type of `content`.
    pub content_type: String,
    /// File name sent in `Content-Disposition`.
    pub filename: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl Default for UploadDocument {
    fn default() -> Self {
        Self {
            document_id: 1,
            content_type: PDF_CONTENT_TYPE.to_string(),
            filename: String::new(),
            content: Vec::new(),
        }
    }
}

/// An envelope audit event, flattened from DocuSign's `eventFields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditEvent {
    /// Field name to value. Fields with a null value are omitted.
    pub fields: BTreeMap<String, String>,
}

impl AuditEvent {
    /// Value of a field, e.g. `"Action"` or `"UserName"`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Signer {
        Signer {
            client_user_id: Some("some ID in your DB".to_string()),
            email: "signer@example.com".to_string(),
            name: "My Name".to_string(),
            recipient_id: Some("1".to_string()),
            tabs: Tabs {
                sign_here_tabs: vec![SignHereTab {
                    document_id: 1,
                    page_number: 2,
                    x_position: 100,
                    y_position: 200,
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_signer_serialization() {
        let json = serde_json::to_value(signer()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "clientUserId": "some ID in your DB",
                "email": "signer@example.com",
                "name": "My Name",
                "recipientId": "1",
                "tabs": {
                    "signHereTabs": [{
                        "documentId": 1,
                        "pageNumber": 2,
                        "xPosition": 100,
                        "yPosition": 200
                    }]
                }
            })
        );
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = Envelope {
            status: EnvelopeStatus::DRAFT,
            email_subject: "This is the email subject".to_string(),
            email_blurb: "This is the email body".to_string(),
            documents: vec![Document::pdf(2, "document.pdf", b"%PDF-1.4".to_vec())],
            recipients: Recipients {
                signers: vec![signer()],
            },
            sobo_email: Some("sobo@example.com".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "created");
        assert_eq!(json["emailSubject"], "This is the email subject");
        assert_eq!(json["emailBlurb"], "This is the email body");
        assert_eq!(
            json["documents"],
            serde_json::json!([{ "documentId": 2, "name": "document.pdf" }])
        );
        assert_eq!(json["recipients"]["signers"][0]["email"], "signer@example.com");
        assert!(json.get("templateId").is_none());
        assert!(json.get("templateRoles").is_none());
        assert!(json.get("soboEmail").is_none());
    }

    #[test]
    fn test_template_envelope_serialization() {
        let envelope = Envelope {
            template_id: Some(Uuid::nil()),
            template_roles: vec![Role {
                email: "jean.francais@example.com".to_string(),
                name: "Jean Français".to_string(),
                role_name: "Role 1".to_string(),
                client_user_id: Some("1".to_string()),
            }],
            event_notification: Some(EventNotification {
                url: "https://example.com/callback".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "sent");
        assert_eq!(json["templateId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["templateRoles"][0]["roleName"], "Role 1");
        assert_eq!(
            json["eventNotification"],
            serde_json::json!({ "url": "https://example.com/callback" })
        );
        assert!(json.get("documents").is_none());
        assert!(json.get("recipients").is_none());
    }

    #[test]
    fn test_search_params() {
        let params = EnvelopeSearch::default().params();
        assert_eq!(params, vec![("from_date".to_string(), "1/1/1900".to_string())]);

        let params = EnvelopeSearch {
            custom_field: Some(("order".to_string(), "42".to_string())),
            status: Some("completed".to_string()),
            ..Default::default()
        }
        .params();
        assert_eq!(params[1], ("custom_field".to_string(), "order=42".to_string()));
        assert_eq!(params[2], ("status".to_string(), "completed".to_string()));

        // a field name without value is dropped
        let params = EnvelopeSearch {
            custom_field: Some(("order".to_string(), String::new())),
            ..Default::default()
        }
        .params();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_envelope_summary_deserialization() {
        let json = r#"{
            "envelopeId": "4b728be4-4d7a-4e5d-8f87-2a4d0b6f3c10",
            "status": "sent",
            "statusDateTime": "2015-01-01T00:00:00.0000000Z",
            "uri": "/envelopes/4b728be4-4d7a-4e5d-8f87-2a4d0b6f3c10"
        }"#;
        let summary: EnvelopeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.status.as_deref(), Some("sent"));
        assert_eq!(
            summary.envelope_id.to_string(),
            "4b728be4-4d7a-4e5d-8f87-2a4d0b6f3c10"
        );
    }
}
