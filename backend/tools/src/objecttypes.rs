//! Objecttype and property metadata tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use abagenta_client::AgentaBackend;
use abagenta_core::{AgentaError, Tool};

use crate::args;
use crate::render;

pub struct GetObjectTypesTool {
    backend: Arc<dyn AgentaBackend>,
}

impl GetObjectTypesTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetObjectTypesTool {
    fn name(&self) -> &str {
        "get_objecttypes"
    }

    fn description(&self) -> &str {
        "Load list of all objecttype definitions from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _call_args: &Value) -> Result<String, AgentaError> {
        let objecttypes = self.backend.get_objecttypes().await?;
        Ok(render::json_block(&objecttypes))
    }
}

pub struct FilterObjectTypesTool {
    backend: Arc<dyn AgentaBackend>,
}

impl FilterObjectTypesTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for FilterObjectTypesTool {
    fn name(&self) -> &str {
        "filter_objecttypes"
    }

    fn description(&self) -> &str {
        "Load list of objecttype definitions according to a filter from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filter": {
                    "type": "object",
                    "description": "Filter criteria in MongoDB-like query format (e.g., {'name': {'$endsWith': 'daten'}})",
                    "additionalProperties": true
                }
            },
            "required": ["filter"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let filter = args::required_object(call_args, self.name(), "filter")?;
        let objecttypes = self.backend.filter_objecttypes(filter).await?;
        Ok(render::json_block(&objecttypes))
    }
}

pub struct GetObjectTypeTool {
    backend: Arc<dyn AgentaBackend>,
}

impl GetObjectTypeTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetObjectTypeTool {
    fn name(&self) -> &str {
        "get_objecttype"
    }

    fn description(&self) -> &str {
        "Load a single objecttype definition from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype to retrieve (e.g., -54346245)"
                }
            },
            "required": ["objecttype"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let descriptor = self.backend.get_objecttype(objecttype).await?;
        Ok(render::json_block(&descriptor))
    }
}

pub struct GetPropertiesTool {
    backend: Arc<dyn AgentaBackend>,
}

impl GetPropertiesTool {
    pub fn new(backend: Arc<dyn AgentaBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetPropertiesTool {
    fn name(&self) -> &str {
        "get_properties"
    }

    fn description(&self) -> &str {
        "Load list of property definitions for an objecttype from aB-Agenta"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objecttype": {
                    "type": "string",
                    "description": "The objecttype whose properties to load (e.g., -54346245)"
                }
            },
            "required": ["objecttype"]
        })
    }

    async fn execute(&self, call_args: &Value) -> Result<String, AgentaError> {
        let objecttype = args::required_str(call_args, self.name(), "objecttype")?;
        let properties = self.backend.get_properties(objecttype).await?;
        Ok(render::json_block(&properties))
    }
}
