//! Result normalization: every backend result shape maps to exactly one
//! rendered text form. The shape is fixed by the originating operation's
//! return type, never inferred from the payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use abagenta_core::{DocumentContent, RecordPage};

/// Pretty-print any JSON payload.
pub fn json_block<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Record list followed by the pagination metadata read from response
/// headers, when the service provided it.
pub fn page(page: &RecordPage) -> String {
    let mut text = json_block(&page.records);
    if let Some(total) = page.total_count {
        text.push_str(&format!("\n\nTotal Count: {total}"));
    }
    if let Some(range) = &page.content_range {
        text.push_str(&format!("\nContent-Range: {range}"));
    }
    text
}

pub fn created_record(id: &str) -> String {
    format!("Record created successfully with ID: {id}")
}

pub fn uploaded_document(id: &str) -> String {
    format!("Document uploaded successfully with ID: {id}")
}

/// Binary download summary: metadata up front, payload as base64.
pub fn document(doc: &DocumentContent) -> String {
    format!(
        "Document downloaded successfully\nContent-Type: {}\nFilename: {}\nSize: {} bytes\n\nData (base64): {}",
        doc.content_type.as_deref().unwrap_or("unknown"),
        doc.filename.as_deref().unwrap_or("unknown"),
        doc.data.len(),
        BASE64.encode(&doc.data),
    )
}
