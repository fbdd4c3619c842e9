//! Core types, traits, and the tool registry for the aB-Agenta MCP server.

pub mod error;
pub mod tools;
pub mod traits;
pub mod types;

pub use error::{AgentaError, ApiFailure};
pub use tools::{ToolDefinition, ToolRegistry};
pub use traits::Tool;
pub use types::{
    DocumentContent, DocumentUpload, Record, RecordPage, RecordQuery, ToolResponse,
};
