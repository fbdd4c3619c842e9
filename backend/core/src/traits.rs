use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentaError;

/// One named operation the dispatcher can route.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "get_record").
    fn name(&self) -> &str;

    /// Description shown to MCP clients.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's argument object.
    fn parameters(&self) -> Value;

    /// Execute with the given arguments and return the rendered response
    /// text. Argument presence has been checked against `parameters()` by
    /// the dispatcher before this runs.
    async fn execute(&self, args: &Value) -> Result<String, AgentaError>;
}
