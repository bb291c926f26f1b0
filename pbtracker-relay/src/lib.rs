//! pbtracker-relay: stateless chat relay for the budget tracker
//!
//! Accepts a user message plus the client-computed financial context,
//! assembles the system prompt, makes one bounded call to the chat
//! completion provider, and maps the outcome onto a small set of HTTP
//! status codes. No caching, no retries, no conversation state.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod routes;

pub use error::RelayError;
pub use routes::{router, AppState};
