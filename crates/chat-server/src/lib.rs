//! chat-server
//!
//! HTTP polling server for the room relay.

pub mod config;
pub mod types;
pub mod server;
pub mod routes;
pub mod sqlite_store;

// internal: only reachable through `server`
mod audit_task;
