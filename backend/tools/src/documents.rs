//! Document tools: binary download and raw-body upload.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use abagenta_client::AgentaBackend;
use abagenta_core::{AgentaError, DocumentUpload, Tool};

use crate::args;
use crate::render;

pub struct DownloadDocumentTool {
    backend: Arc<dyn AgentaBackend>,
}

impl DownloadDocumentTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for DownloadDocumentTool {
    fn name(&self) -> &str {
        "download_document"
    }

    fn description(&self) -> &str {
        "Download a document by ID from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "ID of the document to download (e.g., 8573a0d3-f6ea-4029-86d4-7a5359e054cc)"
                }
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let id = args::required_str(call_args, self.name(), "id")?;
        let document = self.backend.download_document(id).await?;
        Ok(render::document(&document))
    }
}

pub struct UploadDocumentTool {
    backend: Arc<dyn AgentaBackend>,
}

impl UploadDocumentTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for UploadDocumentTool {
    fn name(&self) -> &str {
        "upload_document"
    }

    fn description(&self) -> &str {
        "Upload a file as a new document in aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "addressid": {
                    "type": "string",
                    "description": "ID of address-record to which the document belongs (e.g., 7)"
                },
                "filepath": {
                    "type": "string",
                    "description": "Path to the file to upload"
                },
                "filename": {
                    "type": "string",
                    "description": "Filename for the document (e.g., scan_2022_1_1.pdf)"
                },
                "referenceid": {
                    "type": "string",
                    "description": "ID of another record to which the document also belongs"
                },
                "referenceobjecttype": {
                    "type": "string",
                    "description": "Objecttype of the reference record (e.g., -54346245)"
                },
                "info": {
                    "type": "string",
                    "description": "Info text of the document (e.g., correspondence)"
                },
                "type": {
                    "type": "string",
                    "description": "Type of the document (e.g., scan)"
                },
                "changedate": {
                    "type": "string",
                    "description": "Datetime of last change of the document (ISO 8601 format, e.g., 2022-01-01T00:00:00)"
                },
                "idempotencyKey": {
                    "type": "string",
                    "description": "A unique key to realize idempotent behaviour (optional but recommended)"
                }
            },
            "required": ["addressid", "filepath"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let addressid = args::required_str(call_args, self.name(), "addressid")?;
        let filepath = args::required_str(call_args, self.name(), "filepath")?;

        let content = tokio::fs::read(filepath)
            .await
            .map_err(|err| AgentaError::Transport(format!("failed to read {filepath}: {err}")))?;

        // Explicit filename wins; otherwise the file's own basename.
        let filename = args::optional_str(call_args, "filename")
            .map(str::to_string)
            .or_else(|| {
                Path::new(filepath)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            });

        let upload = DocumentUpload {
            addressid: addressid.to_string(),
            content,
            filename,
            referenceid: args::optional_str(call_args, "referenceid").map(str::to_string),
            referenceobjecttype: args::optional_str(call_args, "referenceobjecttype")
                .map(str::to_string),
            info: args::optional_str(call_args, "info").map(str::to_string),
            doc_type: args::optional_str(call_args, "type").map(str::to_string),
            changedate: args::optional_str(call_args, "changedate").map(str::to_string),
            idempotency_key: args::optional_str(call_args, "idempotencyKey").map(str::to_string),
        };

        let id = self.backend.upload_document(upload).await?;
        Ok(render::uploaded_document(&id))
    }
}
