//! Token codec module for JWT management
//!
//! This module signs and verifies the two kinds of session tokens:
//! - short-lived access tokens presented on every request
//! - long-lived refresh tokens exchanged for a new pair
//!
//! Each kind has its own secret and lifetime. Only HS256 is accepted.

mod codec;
mod config;


pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
