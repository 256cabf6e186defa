//! # DocuSign Rust client
//!
//! Async client for the DocuSign eSignature REST API (v2).
//!
//! The client covers login and accounts, envelope creation from documents or
//! templates, recipients and embedded signing, document upload/download, and
//! envelope audit events. Responses the crate does not model are returned as
//! [`serde_json::Value`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docusign::{Client, Credentials, Document, Envelope, Recipients, Signer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(
//!         "https://demo.docusign.net/restapi/v2",
//!         Credentials::Legacy {
//!             username: "me@example.com".to_string(),
//!             password: "secret".to_string(),
//!             integrator_key: "integrator-key".to_string(),
//!         },
//!     )?;
//!
//!     // The account is resolved on first use; no explicit login needed.
//!     let envelope = Envelope {
//!         email_subject: "Please sign".to_string(),
//!         documents: vec![Document::pdf(1, "contract.pdf", std::fs::read("contract.pdf")?)],
//!         recipients: Recipients {
//!             signers: vec![Signer {
//!                 email: "signer@example.com".to_string(),
//!                 name: "Signer".to_string(),
//!                 recipient_id: Some("1".to_string()),
//!                 ..Default::default()
//!             }],
//!         },
//!         ..Default::default()
//!     };
//!     let created = client.envelopes().create_from_document(&envelope).await?;
//!
//!     let recipients = client.recipients().list(&created.envelope_id).await?;
//!     println!("{}", recipients);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`Client::from_env`] reads `DOCUSIGN_ROOT_URL`, `DOCUSIGN_USERNAME`,
//! `DOCUSIGN_PASSWORD`, `DOCUSIGN_INTEGRATOR_KEY`, `DOCUSIGN_ACCOUNT_ID`,
//! `DOCUSIGN_APP_TOKEN`, `DOCUSIGN_OAUTH2_TOKEN` and `DOCUSIGN_TIMEOUT`.
//! A non-empty OAuth2 token switches from the legacy authentication header to
//! a bearer token.
//!
//! ## Error Handling
//!
//! All operations return `Result<T, DocuSignError>`:
//!
//! ```rust,no_run
//! use docusign::{Client, DocuSignError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::from_env().unwrap();
//!
//!     match client.accounts().login_information().await {
//!         Ok(login) => println!("{}", login["loginAccounts"][0]["accountId"]),
//!         Err(e) if e.is_auth_error() => println!("Bad credentials"),
//!         Err(DocuSignError::UnexpectedStatus { status, .. }) => println!("HTTP {}", status),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

pub mod accounts;
pub mod audit;
pub mod auth;
pub mod client;
pub mod config;
pub mod documents;
pub mod envelopes;
pub mod error;
pub mod multipart;
pub mod recipients;
pub mod templates;
pub mod types;

// Re-export main types at the crate root
pub use auth::Credentials;
pub use client::{AccountContext, Client, PreparedRequest, RequestBody, RequestOptions, ResponseBody};
pub use config::ClientConfig;
pub use documents::DocumentDownload;
pub use error::{DocuSignError, Result};

pub use types::{
    ApproveTab, AuditEvent, Document, Envelope, EnvelopeSearch, EnvelopeStatus, EnvelopeSummary,
    EventNotification, RecipientViewRequest, Recipients, Role, SignHereTab, Signer, Tabs,
    UploadDocument,
};
