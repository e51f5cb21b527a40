//! HTTP API of the Lockbox server
//!
//! Exposed as a library so integration tests can build the application with
//! in-memory collaborators.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
