//! Business services containing domain logic and use cases.

pub mod blob;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use blob::BlobService;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use session::{AccessTokenIdentifier, SessionService};
pub use token::{TokenCodec, TokenCodecConfig};
