//! Object-safe traits the rest of the crate hashes through

use std::sync::Arc;

/// A registered hash algorithm
pub trait HashAlgorithmImpl: Send + Sync {
    /// Unique identifier for this algorithm
    fn id(&self) -> &'static str;

    /// Display name for user interfaces
    fn display_name(&self) -> &'static str;

    /// Digest length in bytes
    fn digest_len(&self) -> usize;

    /// Create a new streaming hasher instance
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate hash for in-memory data
    fn hash_bytes(&self, data: &[u8]) -> String {
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

/// One in-flight digest computation
///
/// `finalize` consumes the hasher, so a finished computation cannot be
/// fed more data.
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Total bytes absorbed so far
    fn bytes_processed(&self) -> u64;

    /// Finalize the hash calculation and return the lowercase hex digest
    fn finalize(self: Box<Self>) -> String;
}

/// Maps the public algorithm enum onto its registered implementation
pub trait HashAlgorithmExt {
    /// Look up the registered implementation
    fn to_impl(&self) -> Arc<dyn HashAlgorithmImpl>;
}
