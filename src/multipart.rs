//! Multipart framing for envelope creation.
//!
//! DocuSign takes the envelope definition as a JSON part followed by one part
//! per document. The layout is fixed; only the JSON and the documents vary.

use crate::error::{DocuSignError, Result};
use crate::types::Document;

/// Boundary separating the parts.
pub const BOUNDARY: &str = "myboundary";

/// `Content-Type` of a multipart envelope request.
pub const CONTENT_TYPE: &str = "multipart/form-data; boundary=myboundary";

/// Assemble a multipart body from the envelope JSON and its documents.
///
/// Document bytes are copied as-is, so binary files survive untouched. Names
/// and content types land in part headers: control characters, and quotes in
/// names, are rejected with [`DocuSignError::InvalidDocument`].
pub fn envelope_body(envelope_json: &str, documents: &[Document]) -> Result<Vec<u8>> {
    for document in documents {
        check_part_header(document)?;
    }

    let documents_len: usize = documents.iter().map(|d| d.content.len() + 128).sum();
    let mut body = Vec::with_capacity(envelope_json.len() + documents_len + 256);

    body.extend_from_slice(b"\r\n\r\n");
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(envelope_json.as_bytes());
    body.extend_from_slice(b"\r\n");

    for document in documents {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Type:{}\r\n", document.content_type).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: file; filename=\"{}\"; documentId={} \r\n",
                document.name, document.document_id
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&document.content);
        body.extend_from_slice(b"\r\n\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"\r\n");
    Ok(body)
}

fn check_part_header(document: &Document) -> Result<()> {
    if document.name.chars().any(|c| c.is_control() || c == '"') {
        return Err(DocuSignError::InvalidDocument(format!(
            "document {} has a name with quotes or control characters: {:?}",
            document.document_id, document.name
        )));
    }
    if document.content_type.chars().any(char::is_control) {
        return Err(DocuSignError::InvalidDocument(format!(
            "document {} has a content type with control characters: {:?}",
            document.document_id, document.content_type
        )));
    }
    Ok(())
}
