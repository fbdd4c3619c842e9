//! Execution backends for the aB-Agenta record store.
//!
//! One capability trait, two implementations: [`HttpBackend`] talks to a
//! live aB-Agenta endpoint, [`SimulatedBackend`] fabricates deterministic
//! canned data with identical shapes for offline runs. The choice is made
//! once at startup; nothing downstream branches on the mode.

pub mod backend;
pub mod diagnose;
pub mod http;
pub mod simulated;

pub use backend::AgentaBackend;
pub use diagnose::diagnose;
pub use http::HttpBackend;
pub use simulated::SimulatedBackend;
