//! HTTP API for the interview question store.
//!
//! The binary in `main.rs` wires configuration and the store together;
//! everything routable lives here so integration tests can drive the
//! router directly.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
