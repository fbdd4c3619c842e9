//! Record tools: single fetch, listing, filtered listing, and creation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use abagenta_client::AgentaBackend;
use abagenta_core::{AgentaError, Tool};

use crate::args;
use crate::render;

pub struct GetRecordTool {
    backend: Arc<dyn AgentaBackend>,
}

impl GetRecordTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetRecordTool {
    fn name(&self) -> &str {
        "get_record"
    }

    fn description(&self) -> &str {
        "Retrieve a record by ID and object type from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype of the record to retrieve (e.g., -54346245)"
                },
                "id": {
                    "type": "string",
                    "description": "The ID of the record to retrieve (e.g., aad2210a-89b8-4556-9091-d94598dcd9eb)"
                },
                "fields": {
                    "type": "string",
                    "description": "Comma-separated list of record fields to load; omit to load all fields"
                },
                "resolvetexts": {
                    "type": "boolean",
                    "description": "Resolve encoded fields and references to nice text"
                }
            },
            "required": ["objecttype", "id"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let id = args::required_str(call_args, self.name(), "id")?;
        let record = self
            .backend
            .get_record(
                objecttype,
                id,
                args::optional_str(call_args, "fields"),
                args::optional_bool(call_args, "resolvetexts"),
            )
            .await?;
        Ok(render::json_block(&record))
    }
}

pub struct GetRecordsTool {
    backend: Arc<dyn AgentaBackend>,
}

impl GetRecordsTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetRecordsTool {
    fn name(&self) -> &str {
        "get_records"
    }

    fn description(&self) -> &str {
        "Retrieve multiple records by object type from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype of records to retrieve (e.g., -54346245)"
                },
                "fields": {
                    "type": "string",
                    "description": "Comma-separated list of fields to load (e.g., 'system_id,idadresse,ablauf,spartennr')"
                },
                "order": {
                    "type": "string",
                    "description": "Comma-separated list of fields to order by (e.g., 'spartennr,ablauf desc')"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximal number of records to return (default: 10)"
                },
                "offset": {
                    "type": "number",
                    "description": "Number of records to skip (default: 0)"
                },
                "resolvetexts": {
                    "type": "boolean",
                    "description": "Resolve encoded fields and references to nice text with 'plaintext__' prefix"
                },
                "deletedrecords": {
                    "type": "number",
                    "description": "Whether deleted records are loaded: 1=active only, 2=deleted only, 3=active and deleted (default: 1)",
                    "enum": [1, 2, 3]
                },
                "archivedrecords": {
                    "type": "number",
                    "description": "Whether archived records are loaded: 1=active only, 2=archived only, 3=active and archived (default: 1)",
                    "enum": [1, 2, 3]
                }
            },
            "required": ["objecttype"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let query = args::record_query(call_args);
        let page = self.backend.get_records(objecttype, &query).await?;
        Ok(render::page(&page))
    }
}

pub struct FilterRecordsTool {
    backend: Arc<dyn AgentaBackend>,
}

impl FilterRecordsTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for FilterRecordsTool {
    fn name(&self) -> &str {
        "filter_records"
    }

    fn description(&self) -> &str {
        "Retrieve records by object type with filter criteria from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype of records to retrieve (e.g., -54346245)"
                },
                "filter": {
                    "type": "object",
                    "description": "Filter criteria in MongoDB-like query format (e.g., {'$or': [{'idadresse': '7'}, {'ablauf': {'$gt': '2010-01-01T00:00:00.000'}}]})",
                    "additionalProperties": true
                },
                "fields": {
                    "type": "string",
                    "description": "Comma-separated list of fields to load (e.g., 'system_id,idadresse,ablauf,spartennr')"
                },
                "order": {
                    "type": "string",
                    "description": "Comma-separated list of fields to order by (e.g., 'spartennr,ablauf desc')"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximal number of records to return (default: 10)"
                },
                "offset": {
                    "type": "number",
                    "description": "Number of records to skip (default: 0)"
                },
                "resolvetexts": {
                    "type": "boolean",
                    "description": "Resolve encoded fields and references to nice text with 'plaintext__' prefix"
                },
                "deletedrecords": {
                    "type": "number",
                    "description": "Whether deleted records are loaded: 1=active only, 2=deleted only, 3=active and deleted (default: 1)",
                    "enum": [1, 2, 3]
                },
                "archivedrecords": {
                    "type": "number",
                    "description": "Whether archived records are loaded: 1=active only, 2=archived only, 3=active and archived (default: 1)",
                    "enum": [1, 2, 3]
                }
            },
            "required": ["objecttype", "filter"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let filter = args::required_object(call_args, self.name(), "filter")?;
        let query = args::record_query(call_args);
        let page = self
            .backend
            .filter_records(objecttype, filter, &query)
            .await?;
        Ok(render::page(&page))
    }
}

pub struct CreateRecordTool {
    backend: Arc<dyn AgentaBackend>,
}

impl CreateRecordTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for CreateRecordTool {
    fn name(&self) -> &str {
        "create_record"
    }

    fn description(&self) -> &str {
        "Create a new record in aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype of the record to create (e.g., -54346245)"
                },
                "data": {
                    "type": "object",
                    "description": "The fields of the new record",
                    "additionalProperties": true
                },
                "idempotencyKey": {
                    "type": "string",
                    "description": "A unique key to realize idempotent behaviour (optional but recommended)"
                }
            },
            "required": ["objecttype", "data"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let data = args::required_object(call_args, self.name(), "data")?;
        let id = self
            .backend
            .create_record(
                objecttype,
                data,
                args::optional_str(call_args, "idempotencyKey"),
            )
            .await?;
        Ok(render::created_record(&id))
    }
}
