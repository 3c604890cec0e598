//! hashcmp core library
//!
//! Streaming MD5, SHA-1 and SHA-256 digests of byte streams and files,
//! without buffering whole inputs in memory.

pub mod error;
pub mod file_io;
pub mod hashing;
pub mod progress;

pub use error::{Error, Result};
pub use file_io::{FileProcessingResult, FileProcessor};
pub use hashing::{
    ChunkReader, HashAlgorithm, HashCalculator, HashResult, StrategyHint, digest, digest_bytes,
    digest_chunks,
};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate};

use error::ValidationError;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bytes requested per file read
    pub chunk_size: usize,
    /// File size above which several algorithms are hashed by parallel workers
    pub parallel_threshold: u64,
    /// Bias for strategy selection
    pub strategy_hint: StrategyHint,
    /// Files hashed concurrently by [`FileProcessor::process_files`]
    pub max_concurrent_files: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,                    // 64KB reads
            parallel_threshold: 64 * 1024 * 1024,     // 64MB
            strategy_hint: StrategyHint::Automatic,
            max_concurrent_files: 4,
        }
    }
}

impl EngineConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            chunk_size: 1024, // 1KB chunks so tests cross many block boundaries
            parallel_threshold: 16 * 1024,
            strategy_hint: StrategyHint::Automatic,
            max_concurrent_files: 2,
        }
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(
                ValidationError::invalid_parameter("chunk_size", "must be at least 1").into(),
            );
        }
        if self.max_concurrent_files == 0 {
            return Err(ValidationError::invalid_parameter(
                "max_concurrent_files",
                "must be at least 1",
            )
            .into());
        }
        Ok(())
    }
}
