//! MCP gateway for the aB-Agenta tool catalog.
//!
//! Carries the Model Context Protocol over an SSE transport: clients open a
//! stream on `/sse`, post JSON-RPC requests to `/message`, and read the
//! responses back off the stream.

pub mod rpc;
pub mod server;
pub mod session;

pub use server::{GatewayState, build_router, start_server};
pub use session::SessionRegistry;
