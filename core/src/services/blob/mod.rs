//! Per-user blob storage service
//!
//! Blobs are ciphertext produced by the client; the server stores and
//! returns them byte for byte without interpreting them.

mod service;


pub use service::{validate_filename, BlobService, MAX_FILENAME_LENGTH};
