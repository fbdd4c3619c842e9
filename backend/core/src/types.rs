use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single aB-Agenta record: an opaque field mapping. `system_id` is the
/// stable identifier; fields prefixed `plaintext__` are server-resolved
/// readable shadows of their encoded counterparts and pass through verbatim.
pub type Record = Map<String, Value>;

/// One page of records plus the pagination metadata the list endpoints
/// return out-of-band in response headers.
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub total_count: Option<u64>,
    pub content_range: Option<String>,
}

/// Query options shared by the list operations. Absent fields are never put
/// on the wire; defaulting is the remote service's job.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Comma-separated field names to load.
    pub fields: Option<String>,
    /// Comma-separated order clause, e.g. `spartennr,ablauf desc`.
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// Resolve encoded fields and references into `plaintext__` shadows.
    pub resolvetexts: Option<bool>,
    /// 1 = active only, 2 = deleted only, 3 = both.
    pub deletedrecords: Option<u8>,
    /// 1 = active only, 2 = archived only, 3 = both.
    pub archivedrecords: Option<u8>,
}

/// A downloaded document body with its transport metadata.
#[derive(Debug, Clone)]
pub struct DocumentContent {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

/// Everything needed to store a new document.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpload {
    /// Address record the document belongs to.
    pub addressid: String,
    /// Raw file bytes, sent as the request body.
    pub content: Vec<u8>,
    pub filename: Option<String>,
    /// Another record the document also belongs to.
    pub referenceid: Option<String>,
    pub referenceobjecttype: Option<String>,
    pub info: Option<String>,
    pub doc_type: Option<String>,
    /// ISO 8601 datetime of the document's last change.
    pub changedate: Option<String>,
    /// Caller-supplied key the service uses to deduplicate retried creates.
    pub idempotency_key: Option<String>,
}

/// Final envelope for one tool invocation. Failures are carried as data —
/// the dispatcher never raises to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}
