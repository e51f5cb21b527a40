//! Blob content storage on the local filesystem

mod disk;

#[cfg(test)]
mod tests;

pub use disk::DiskBlobStorage;
