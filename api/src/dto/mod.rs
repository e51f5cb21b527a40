//! Request and response bodies of the HTTP API

pub mod auth;
pub mod error;
pub mod files;

pub use auth::*;
pub use error::*;
pub use files::*;
