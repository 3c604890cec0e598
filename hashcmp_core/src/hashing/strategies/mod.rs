//! Hash calculation strategies for file processing
//!
//! - `SequentialStrategy`: one read of the file per algorithm
//! - `MultipleStrategy`: every algorithm fed from a single pass
//! - `ParallelStrategy`: one blocking worker and one independent read per
//!   algorithm
//!
//! [`StrategySelector`] picks one from the algorithm count and file size.
//! Whichever runs, each algorithm sees exactly the file's bytes in order,
//! so the choice never affects the digests.

use crate::progress::{NullProvider, ProgressProvider};
use crate::{Error, HashAlgorithm, HashResult, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

mod multiple;
mod parallel;
mod selector;
mod sequential;

pub use multiple::MultipleStrategy;
pub use parallel::ParallelStrategy;
pub use selector::{StrategyHint, StrategySelector};
pub use sequential::SequentialStrategy;

/// Default read buffer for file strategies
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default file size above which several algorithms run in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 64 * 1024 * 1024;

/// Context information passed to hashing strategies
#[derive(Debug, Clone)]
pub struct HashingContext {
    /// Path to the file being hashed
    pub file_path: PathBuf,
    /// Size of the file in bytes when hashing started
    pub file_size: u64,
    /// Hash algorithms to calculate
    pub algorithms: Vec<HashAlgorithm>,
    /// Configuration parameters
    pub config: HashConfig,
}

/// Configuration for hash calculation strategies
#[derive(Debug, Clone)]
pub struct HashConfig {
    /// Buffer size for each read
    pub buffer_size: usize,
    /// Files larger than this are hashed by parallel workers when more
    /// than one algorithm is requested
    pub parallel_threshold: u64,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Performance metrics from strategy execution
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Total duration of the operation
    pub duration: Duration,
    /// Average throughput in MB/s
    pub throughput_mbps: f64,
    /// Number of read calls performed
    pub io_operations: u64,
}

impl PerformanceMetrics {
    pub(crate) fn new(duration: Duration, bytes: u64, io_operations: u64) -> Self {
        let throughput_mbps = if duration.as_secs_f64() > 0.0 {
            (bytes as f64 / 1_048_576.0) / duration.as_secs_f64()
        } else {
            0.0
        };
        Self {
            duration,
            throughput_mbps,
            io_operations,
        }
    }
}

/// Result from strategy execution
#[derive(Debug)]
pub struct StrategyResult {
    /// Hash results for each algorithm
    pub results: HashMap<HashAlgorithm, HashResult>,
    /// Performance metrics from execution
    pub metrics: PerformanceMetrics,
}

/// Core trait for hash calculation strategies
#[async_trait]
pub trait HashingStrategy: Send + Sync {
    /// Strategy identifier for logging
    fn name(&self) -> &'static str;

    /// Execute the hashing strategy without progress reporting
    async fn execute(&self, context: HashingContext) -> Result<StrategyResult> {
        self.execute_with_progress(context, &NullProvider).await
    }

    /// Execute the hashing strategy with progress reporting
    async fn execute_with_progress(
        &self,
        context: HashingContext,
        progress_provider: &dyn ProgressProvider,
    ) -> Result<StrategyResult>;
}

/// Open a file for hashing, tagging failures with its path
pub(crate) async fn open_source(path: &Path) -> Result<File> {
    File::open(path)
        .await
        .map_err(|e| Error::from(e).with_path(path))
}

/// Fill as much of `buffer` as one read returns; 0 means end of file
pub(crate) async fn read_chunk(file: &mut File, buffer: &mut [u8], path: &Path) -> Result<usize> {
    loop {
        match file.read(buffer).await {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::from(e).with_path(path)),
        }
    }
}
