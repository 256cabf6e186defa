//! Embedded signing walkthrough.
//!
//! This example demonstrates:
//! - Resolving the account from the environment
//! - Creating an envelope with one embedded signer
//! - Requesting the signing URL
//! - Downloading the signed PDF and the audit trail
//!
//! Run with:
//! ```bash
//! DOCUSIGN_ROOT_URL=https://demo.docusign.net/restapi/v2 \
//! DOCUSIGN_USERNAME=me@example.com DOCUSIGN_PASSWORD=... DOCUSIGN_INTEGRATOR_KEY=... \
//! RUST_LOG=docusign=debug cargo run --example embedded_signing -- contract.pdf
//! ```

use docusign::{
    Client, Document, Envelope, RecipientViewRequest, Recipients, SignHereTab, Signer, Tabs,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pdf_path = std::env::args()
        .nth(1)
        .ok_or("usage: embedded_signing <document.pdf>")?;
    let signer_email =
        std::env::var("SIGNER_EMAIL").unwrap_or_else(|_| "signer@example.com".to_string());

    let client = Client::from_env()?;

    // Login
    println!("Logging in...");
    let account = client.ensure_account().await?;
    println!("Account: {} ({})", account.account_id, account.account_url);

    // Create the envelope
    println!("\nCreating envelope...");
    let envelope = Envelope {
        email_subject: "Please sign this document".to_string(),
        email_blurb: "Signed from the Rust client".to_string(),
        documents: vec![Document::pdf(1, "document.pdf", std::fs::read(&pdf_path)?)],
        recipients: Recipients {
            signers: vec![Signer {
                client_user_id: Some("1".to_string()),
                email: signer_email.clone(),
                name: "Embedded Signer".to_string(),
                recipient_id: Some("1".to_string()),
                tabs: Tabs {
                    sign_here_tabs: vec![SignHereTab {
                        document_id: 1,
                        page_number: 1,
                        x_position: 100,
                        y_position: 100,
                    }],
                    ..Default::default()
                },
                ..Default::default()
            }],
        },
        ..Default::default()
    };
    let created = client.envelopes().create_from_document(&envelope).await?;
    println!("Created envelope {}", created.envelope_id);

    // Embedded signing URL
    let view = client
        .recipients()
        .create_view(RecipientViewRequest {
            client_user_id: "1".to_string(),
            email: signer_email,
            envelope_id: created.envelope_id,
            return_url: "https://example.com/signed".to_string(),
            user_name: "Embedded Signer".to_string(),
            ..Default::default()
        })
        .await?;
    println!("\nSign at: {}", view["url"]);

    println!("\nPress Enter once signing is done...");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    // Download the signed document
    let mut download = client.documents().get(&created.envelope_id, "1").await?;
    let mut signed = Vec::new();
    while let Some(chunk) = download.chunk().await? {
        signed.extend_from_slice(&chunk);
    }
    let output = format!("{}.pdf", created.envelope_id);
    std::fs::write(&output, &signed)?;
    println!("Saved {} bytes to {}", signed.len(), output);

    // Audit trail
    println!("\nAudit events:");
    for event in client.audit().events(&created.envelope_id).await? {
        println!(
            "  [{}] {}",
            event.get("logTime").unwrap_or("-"),
            event.get("Action").unwrap_or("-"),
        );
    }

    Ok(())
}
