//! Deterministic offline backend.
//!
//! Fabricates canned aB-Agenta data with the same shapes the live backend
//! produces, so the whole pipeline can run without network access. Read
//! operations are pure functions of their arguments; only the create paths
//! embed per-call uniqueness so generated identifiers never collide.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use abagenta_core::{
    AgentaError, DocumentContent, DocumentUpload, Record, RecordPage, RecordQuery,
};

use crate::backend::AgentaBackend;

/// Fields the canned data can resolve into `plaintext__` shadows.
const RESOLVED_TEXTS: &[(&str, &str)] = &[
    ("idadresse", "Test User, John"),
    ("spartennr", "KFZ"),
];

/// Offline stand-in for the live backend.
#[derive(Default)]
pub struct SimulatedBackend;

impl SimulatedBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgentaBackend for SimulatedBackend {
    async fn get_record(
        &self,
        objecttype: &str,
        id: &str,
        fields: Option<&str>,
        resolvetexts: Option<bool>,
    ) -> Result<Record, AgentaError> {
        debug!(objecttype, id, "Simulated GET record");
        let mut record = as_record(json!({
            "system_id": id,
            "system_idobject": objecttype,
            "vertragsnummer": "VD-TEST-123456",
            "idadresse": "7",
            "spartennr": "139",
            "beitraginclst": 21.55,
            "test_mode": true,
            "requested_fields": fields.unwrap_or("all"),
            "resolvetexts": resolvetexts.unwrap_or(false),
        }));

        if resolvetexts.unwrap_or(false) {
            add_resolved_texts(&mut record);
        }
        if let Some(fields) = fields {
            record = keep_fields(record, fields);
        }
        Ok(record)
    }

    async fn get_records(
        &self,
        objecttype: &str,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError> {
        debug!(objecttype, "Simulated GET records");
        Ok(page(contract_records(objecttype, false), query))
    }

    async fn filter_records(
        &self,
        objecttype: &str,
        filter: &Value,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError> {
        debug!(objecttype, filter = %filter, "Simulated FILTER records");
        Ok(page(contract_records(objecttype, true), query))
    }

    async fn create_record(
        &self,
        objecttype: &str,
        data: &Value,
        idempotency_key: Option<&str>,
    ) -> Result<String, AgentaError> {
        debug!(
            objecttype,
            data = %data,
            idempotency_key = idempotency_key.unwrap_or("<none>"),
            "Simulated CREATE record"
        );
        Ok(fresh_id("test"))
    }

    async fn download_document(&self, id: &str) -> Result<DocumentContent, AgentaError> {
        debug!(id, "Simulated DOWNLOAD document");
        Ok(DocumentContent {
            data: b"Mock PDF document content for testing".to_vec(),
            content_type: Some("application/pdf".to_string()),
            filename: Some("test-document.pdf".to_string()),
        })
    }

    async fn upload_document(&self, upload: DocumentUpload) -> Result<String, AgentaError> {
        debug!(
            addressid = %upload.addressid,
            filename = upload.filename.as_deref().unwrap_or("unknown"),
            size = upload.content.len(),
            "Simulated UPLOAD document"
        );
        Ok(fresh_id("doc-test"))
    }

    async fn get_objecttypes(&self) -> Result<Vec<Value>, AgentaError> {
        debug!("Simulated GET objecttypes");
        Ok(vec![
            json!({
                "system_id": "-54346245",
                "name": "Vertragsdaten",
                "basicidobject": "-54346245"
            }),
            json!({
                "system_id": "-54346246",
                "name": "Adressdaten",
                "basicidobject": "-54346246"
            }),
        ])
    }

    async fn filter_objecttypes(&self, filter: &Value) -> Result<Vec<Value>, AgentaError> {
        debug!(filter = %filter, "Simulated FILTER objecttypes");
        Ok(vec![json!({
            "system_id": "-54346245",
            "name": "Vertragsdaten",
            "basicidobject": "-54346245"
        })])
    }

    async fn get_objecttype(&self, objecttype: &str) -> Result<Value, AgentaError> {
        debug!(objecttype, "Simulated GET objecttype");
        Ok(json!({
            "system_id": objecttype,
            "name": "Vertragsdaten",
            "basicidobject": objecttype
        }))
    }

    async fn get_properties(&self, objecttype: &str) -> Result<Vec<Value>, AgentaError> {
        debug!(objecttype, "Simulated GET properties");
        Ok(vec![
            json!({
                "system_ID": "prop-1",
                "idobject": objecttype,
                "name": "vertragsnummer",
                "bound_on": "field1",
                "datatype_user": 1,
                "plaintext__datatype_user": "Text",
                "type": 0,
                "plaintext__type": "Standard",
                "idlist": "",
                "plaintext__idlist": ""
            }),
            json!({
                "system_ID": "prop-2",
                "idobject": objecttype,
                "name": "idadresse",
                "bound_on": "field2",
                "datatype_user": 2,
                "plaintext__datatype_user": "Number",
                "type": 1,
                "plaintext__type": "Reference",
                "idlist": "list-123",
                "plaintext__idlist": "Address List"
            }),
        ])
    }
}

/// Two canned contract records; filtered queries additionally carry expiry
/// dates and a marker that a filter was applied.
fn contract_records(objecttype: &str, filtered: bool) -> Vec<Record> {
    let mut first = as_record(json!({
        "system_id": "test-id-1",
        "system_idobject": objecttype,
        "vertragsnummer": "VD-TEST-123456",
        "idadresse": "7",
        "spartennr": "139",
        "beitraginclst": 21.55,
        "test_mode": true
    }));
    let mut second = as_record(json!({
        "system_id": "test-id-2",
        "system_idobject": objecttype,
        "vertragsnummer": "VD-TEST-789012",
        "idadresse": "8",
        "spartennr": "140",
        "beitraginclst": 45.20,
        "test_mode": true
    }));

    if filtered {
        first.insert("ablauf".into(), json!("2025-12-31T00:00:00.000"));
        first.insert("filter_applied".into(), json!(true));
        second.insert("ablauf".into(), json!("2026-06-30T00:00:00.000"));
        second.insert("filter_applied".into(), json!(true));
    }

    vec![first, second]
}

/// Apply resolve-texts and field selection, then slice to the requested
/// window, computing the same pagination metadata the live endpoints return
/// in headers.
fn page(mut records: Vec<Record>, query: &RecordQuery) -> RecordPage {
    if query.resolvetexts.unwrap_or(false) {
        for record in &mut records {
            add_resolved_texts(record);
        }
    }
    if let Some(fields) = &query.fields {
        records = records
            .into_iter()
            .map(|record| keep_fields(record, fields))
            .collect();
    }

    let total = records.len();
    let offset = query.offset.unwrap_or(0) as usize;
    let limit = query.limit.unwrap_or(10) as usize;
    let window: Vec<Record> = records.into_iter().skip(offset).take(limit).collect();

    // End index matches the slice actually returned; an empty window yields
    // the service's degenerate `items <offset>-<offset-1>/<total>` form.
    let end = offset as i64 + window.len() as i64 - 1;
    RecordPage {
        content_range: Some(format!("items {offset}-{end}/{total}")),
        total_count: Some(total as u64),
        records: window,
    }
}

/// Shadow fields sit next to the encoded originals, never replacing them.
fn add_resolved_texts(record: &mut Record) {
    for (field, text) in RESOLVED_TEXTS {
        record.insert(format!("plaintext__{field}"), json!(text));
    }
}

/// Intersection of requested field names with the fields actually present;
/// unknown names are silently dropped.
fn keep_fields(record: Record, fields: &str) -> Record {
    let wanted: Vec<&str> = fields.split(',').map(str::trim).collect();
    record
        .into_iter()
        .filter(|(name, _)| wanted.contains(&name.as_str()))
        .collect()
}

fn as_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Time plus random suffix, so repeated creates never collide.
fn fresh_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}-{}-{}",
        Utc::now().timestamp_millis(),
        &suffix[..7]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> SimulatedBackend {
        SimulatedBackend::new()
    }

    #[tokio::test]
    async fn get_record_is_deterministic() {
        let a = backend()
            .get_record("-54346245", "rec-1", None, Some(true))
            .await
            .unwrap();
        let b = backend()
            .get_record("-54346245", "rec-1", None, Some(true))
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a["system_id"], json!("rec-1"));
    }

    #[tokio::test]
    async fn fields_restrict_to_the_intersection() {
        let record = backend()
            .get_record("-54346245", "rec-1", Some("system_id,vertragsnummer,nope"), None)
            .await
            .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["system_id"], json!("rec-1"));
        assert_eq!(record["vertragsnummer"], json!("VD-TEST-123456"));
        assert!(!record.contains_key("nope"));
    }

    #[tokio::test]
    async fn resolvetexts_adds_shadows_and_keeps_originals() {
        let record = backend()
            .get_record("-54346245", "rec-1", None, Some(true))
            .await
            .unwrap();
        assert_eq!(record["plaintext__idadresse"], json!("Test User, John"));
        assert_eq!(record["plaintext__spartennr"], json!("KFZ"));
        assert_eq!(record["idadresse"], json!("7"));
        assert_eq!(record["spartennr"], json!("139"));
    }

    #[tokio::test]
    async fn pagination_slices_and_reports_the_window() {
        let query = RecordQuery {
            limit: Some(1),
            offset: Some(1),
            ..RecordQuery::default()
        };
        let page = backend().get_records("-54346245", &query).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0]["system_id"], json!("test-id-2"));
        assert_eq!(page.total_count, Some(2));
        assert_eq!(page.content_range.as_deref(), Some("items 1-1/2"));
    }

    #[tokio::test]
    async fn pagination_past_the_end_is_empty_without_underflow() {
        let query = RecordQuery {
            offset: Some(2),
            ..RecordQuery::default()
        };
        let page = backend().get_records("-54346245", &query).await.unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.content_range.as_deref(), Some("items 2-1/2"));
    }

    #[tokio::test]
    async fn filtered_page_carries_shadows_and_filter_marker() {
        let query = RecordQuery {
            limit: Some(1),
            resolvetexts: Some(true),
            ..RecordQuery::default()
        };
        let filter = json!({ "$or": [{ "idadresse": "7" }] });
        let page = backend()
            .filter_records("-54346245", &filter, &query)
            .await
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0]["idadresse"], json!("7"));
        assert_eq!(page.records[0]["plaintext__idadresse"], json!("Test User, John"));
        assert_eq!(page.records[0]["plaintext__spartennr"], json!("KFZ"));
        assert_eq!(page.records[0]["filter_applied"], json!(true));
        assert_eq!(page.total_count, Some(2));
        assert_eq!(page.content_range.as_deref(), Some("items 0-0/2"));
    }

    #[tokio::test]
    async fn created_ids_never_repeat() {
        let b = backend();
        let data = json!({ "vertragsnummer": "VD-1" });
        let first = b.create_record("-54346245", &data, None).await.unwrap();
        let second = b.create_record("-54346245", &data, None).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("test-"));

        let upload = DocumentUpload {
            addressid: "7".to_string(),
            content: b"bytes".to_vec(),
            ..DocumentUpload::default()
        };
        let doc_a = b.upload_document(upload.clone()).await.unwrap();
        let doc_b = b.upload_document(upload).await.unwrap();
        assert_ne!(doc_a, doc_b);
        assert!(doc_a.starts_with("doc-test-"));
    }

    #[tokio::test]
    async fn download_returns_fixed_document() {
        let doc = backend().download_document("doc-1").await.unwrap();
        assert_eq!(doc.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(doc.filename.as_deref(), Some("test-document.pdf"));
        assert!(!doc.data.is_empty());
    }

    #[tokio::test]
    async fn objecttype_catalog_is_canned() {
        let b = backend();
        assert_eq!(b.get_objecttypes().await.unwrap().len(), 2);
        assert_eq!(
            b.filter_objecttypes(&json!({ "name": { "$endsWith": "daten" } }))
                .await
                .unwrap()
                .len(),
            1
        );
        let descriptor = b.get_objecttype("-54346245").await.unwrap();
        assert_eq!(descriptor["system_id"], json!("-54346245"));
        assert_eq!(b.get_properties("-54346245").await.unwrap().len(), 2);
    }
}
