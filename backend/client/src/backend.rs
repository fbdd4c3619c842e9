use async_trait::async_trait;
use serde_json::Value;

use abagenta_core::{
    AgentaError, DocumentContent, DocumentUpload, Record, RecordPage, RecordQuery,
};

/// Capability interface over the aB-Agenta record store.
///
/// Both implementations return structurally identical results, which is what
/// lets the simulated variant stand in for the live one when testing the
/// rest of the pipeline.
#[async_trait]
pub trait AgentaBackend: Send + Sync {
    /// Load a single record by object type and id.
    async fn get_record(
        &self,
        objecttype: &str,
        id: &str,
        fields: Option<&str>,
        resolvetexts: Option<bool>,
    ) -> Result<Record, AgentaError>;

    /// Load a page of records for an object type.
    async fn get_records(
        &self,
        objecttype: &str,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError>;

    /// Load a page of records matching a filter expression tree, e.g.
    /// `{"$or":[{"idadresse":"7"},{"ablauf":{"$gt":"2010-01-01T00:00:00.000"}}]}`.
    async fn filter_records(
        &self,
        objecttype: &str,
        filter: &Value,
        query: &RecordQuery,
    ) -> Result<RecordPage, AgentaError>;

    /// Create a record and return its generated identifier.
    async fn create_record(
        &self,
        objecttype: &str,
        data: &Value,
        idempotency_key: Option<&str>,
    ) -> Result<String, AgentaError>;

    /// Download a document body with its transport metadata.
    async fn download_document(&self, id: &str) -> Result<DocumentContent, AgentaError>;

    /// Store a new document and return its generated identifier.
    async fn upload_document(&self, upload: DocumentUpload) -> Result<String, AgentaError>;

    /// List all object-type descriptors.
    async fn get_objecttypes(&self) -> Result<Vec<Value>, AgentaError>;

    /// List object-type descriptors matching a filter expression.
    async fn filter_objecttypes(&self, filter: &Value) -> Result<Vec<Value>, AgentaError>;

    /// Load a single object-type descriptor.
    async fn get_objecttype(&self, objecttype: &str) -> Result<Value, AgentaError>;

    /// List property descriptors for an object type.
    async fn get_properties(&self, objecttype: &str) -> Result<Vec<Value>, AgentaError>;
}
