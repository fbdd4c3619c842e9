//! Runtime configuration for the aB-Agenta MCP server.
//!
//! Everything is read from the environment once at startup and passed down
//! as an immutable struct; nothing re-reads ambient state afterwards.

pub mod redact;
pub mod schema;

pub use redact::mask;
pub use schema::Config;
