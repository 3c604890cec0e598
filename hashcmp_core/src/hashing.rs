//! Hash calculation
//!
//! Streaming MD5, SHA-1 and SHA-256. The block scaffold lives in
//! [`engine`], the three compression functions in `algorithms`, and the
//! file-level execution strategies in `strategies`. This module ties them
//! together behind [`HashAlgorithm`], the `digest*` functions and
//! [`HashCalculator`].

use crate::progress::{NullProvider, ProgressProvider};
use crate::{
    EngineConfig, Error, Result,
    error::{InternalError, ValidationError},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod algorithms;
pub mod engine;
mod registry;
mod source;
mod strategies;
mod traits;
mod words;

pub use engine::{BLOCK_LEN, BlockCompression, BlockHasher, ByteOrder};
pub use registry::AlgorithmRegistry;
pub use source::{ChunkReader, DEFAULT_READ_SIZE};
pub use strategies::{
    HashConfig, HashingContext, HashingStrategy, MultipleStrategy, ParallelStrategy,
    SequentialStrategy, StrategyHint, StrategyResult, StrategySelector,
};
pub use traits::{HashAlgorithmExt, HashAlgorithmImpl, StreamingHasher};

/// Concrete compression functions, for callers that want static dispatch
pub mod compression {
    pub use super::algorithms::md5::Md5;
    pub use super::algorithms::sha1::Sha1;
    pub use super::algorithms::sha256::Sha256;
}

/// Hash algorithms supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (RFC 1321)
    MD5,
    /// SHA-1 (FIPS 180-4)
    SHA1,
    /// SHA-256 (FIPS 180-4)
    SHA256,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order
    pub const ALL: [HashAlgorithm; 3] = [Self::MD5, Self::SHA1, Self::SHA256];

    /// Registry identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::MD5 => "md5",
            Self::SHA1 => "sha1",
            Self::SHA256 => "sha256",
        }
    }

    /// Name shown to users (table headers, reports)
    pub fn display_name(self) -> &'static str {
        match self {
            Self::MD5 => "MD5",
            Self::SHA1 => "SHA-1",
            Self::SHA256 => "SHA-256",
        }
    }

    /// Length of the hex digest in characters
    pub fn hex_len(self) -> usize {
        match self {
            Self::MD5 => 32,
            Self::SHA1 => 40,
            Self::SHA256 => 64,
        }
    }

    /// Start a fresh streaming computation
    pub fn create_hasher(self) -> Box<dyn StreamingHasher> {
        self.to_impl().create_hasher()
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::MD5),
            "sha1" | "sha-1" => Ok(HashAlgorithm::SHA1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::SHA256),
            _ => Err(Error::Validation(ValidationError::unsupported_algorithm(s))),
        }
    }
}

impl HashAlgorithmExt for HashAlgorithm {
    fn to_impl(&self) -> Arc<dyn HashAlgorithmImpl> {
        AlgorithmRegistry::global().implementation(*self)
    }
}

/// Digest everything a blocking reader yields, in 8 KiB reads.
///
/// The reader is dropped (and with it any file handle) before returning,
/// on success and on failure alike.
pub fn digest<R: Read>(algorithm: HashAlgorithm, reader: R) -> Result<String> {
    digest_chunks(algorithm, ChunkReader::new(reader))
}

/// Digest a lazy sequence of chunks.
///
/// The first `Err` aborts the computation and is returned as is; no
/// partial digest escapes.
pub fn digest_chunks<I, B>(algorithm: HashAlgorithm, chunks: I) -> Result<String>
where
    I: IntoIterator<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    let mut hasher = algorithm.create_hasher();
    for chunk in chunks {
        hasher.update(chunk?.as_ref());
    }
    Ok(hasher.finalize())
}

/// Digest an in-memory buffer
pub fn digest_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    algorithm.to_impl().hash_bytes(data)
}

/// Result of hash calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    pub hash: String,
    pub input_size: u64,
    pub duration: Duration,
}

/// Hash calculator for file processing
#[derive(Debug, Clone)]
pub struct HashCalculator {
    /// Strategy selector for choosing the hashing approach
    selector: Arc<StrategySelector>,
    /// Read sizes and thresholds handed to every strategy
    config: HashConfig,
}

impl HashCalculator {
    /// Create a new hash calculator
    pub fn new() -> Self {
        Self::with_hint(StrategyHint::Automatic)
    }

    /// Create a hash calculator with a specific strategy hint
    pub fn with_hint(hint: StrategyHint) -> Self {
        Self {
            selector: Arc::new(StrategySelector::with_hint(hint)),
            config: HashConfig::default(),
        }
    }

    /// Create a hash calculator from the engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            selector: Arc::new(StrategySelector::with_hint(config.strategy_hint)),
            config: HashConfig {
                buffer_size: config.chunk_size,
                parallel_threshold: config.parallel_threshold,
            },
        }
    }

    /// Calculate hash for byte data
    pub fn calculate_bytes(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<HashResult> {
        let start_time = Instant::now();
        let hash = digest_bytes(algorithm, data);

        Ok(HashResult {
            algorithm,
            hash,
            input_size: data.len() as u64,
            duration: start_time.elapsed(),
        })
    }

    /// Calculate hash for a file, streaming it from disk
    pub async fn calculate_file(
        &self,
        file_path: &Path,
        algorithm: HashAlgorithm,
    ) -> Result<HashResult> {
        self.calculate_file_with_progress(file_path, algorithm, &NullProvider)
            .await
    }

    /// Calculate hash for a file with progress reporting
    pub async fn calculate_file_with_progress(
        &self,
        file_path: &Path,
        algorithm: HashAlgorithm,
        progress_provider: &dyn ProgressProvider,
    ) -> Result<HashResult> {
        let mut results = self
            .run(file_path, &[algorithm], progress_provider)
            .await?;

        results.remove(&algorithm).ok_or_else(|| {
            Error::Internal(InternalError::hash_calculation(
                algorithm.id(),
                "No hash result returned from strategy",
            ))
        })
    }

    /// Calculate several hashes of one file, one result per algorithm
    pub async fn calculate_multiple(
        &self,
        file_path: &Path,
        algorithms: &[HashAlgorithm],
    ) -> Result<HashMap<HashAlgorithm, HashResult>> {
        self.calculate_multiple_with_progress(file_path, algorithms, &NullProvider)
            .await
    }

    /// Calculate several hashes of one file with progress reporting
    pub async fn calculate_multiple_with_progress(
        &self,
        file_path: &Path,
        algorithms: &[HashAlgorithm],
        progress_provider: &dyn ProgressProvider,
    ) -> Result<HashMap<HashAlgorithm, HashResult>> {
        if algorithms.is_empty() {
            return Ok(HashMap::new());
        }
        self.run(file_path, algorithms, progress_provider).await
    }

    /// Check if an algorithm is supported
    pub fn supports_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        AlgorithmRegistry::global().get(algorithm.id()).is_some()
    }

    async fn run(
        &self,
        file_path: &Path,
        algorithms: &[HashAlgorithm],
        progress_provider: &dyn ProgressProvider,
    ) -> Result<HashMap<HashAlgorithm, HashResult>> {
        let metadata = tokio::fs::metadata(file_path)
            .await
            .map_err(|e| Error::from(e).with_path(file_path))?;
        if !metadata.is_file() {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "file_path",
                &format!("{} is not a regular file", file_path.display()),
            )));
        }

        let mut unique = algorithms.to_vec();
        unique.sort();
        unique.dedup();

        let context = HashingContext {
            file_path: PathBuf::from(file_path),
            file_size: metadata.len(),
            algorithms: unique,
            config: self.config.clone(),
        };

        let strategy = self.selector.select(&context);
        log::debug!(
            "Hashing {} ({} bytes) with {} strategy",
            file_path.display(),
            context.file_size,
            strategy.name()
        );

        let result = strategy
            .execute_with_progress(context, progress_provider)
            .await?;
        Ok(result.results)
    }
}

impl Default for HashCalculator {
    fn default() -> Self {
        Self::new()
    }
}
