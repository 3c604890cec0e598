//! Sequential hash calculation strategy
//!
//! Processes the file once per algorithm with a single buffer. Best for
//! single algorithms and small files.

use super::{
    HashingContext, HashingStrategy, PerformanceMetrics, StrategyResult, open_source, read_chunk,
};
use crate::hashing::{HashAlgorithm, HashResult};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::{Error, Result, error::ValidationError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Sequential strategy - simple, memory-efficient single-threaded processing
pub struct SequentialStrategy {
    buffer_size: usize,
}

impl SequentialStrategy {
    /// Create a new sequential strategy with the specified buffer size
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Create with the default 64 KiB buffer
    pub fn with_defaults() -> Self {
        Self::new(super::DEFAULT_BUFFER_SIZE)
    }

    async fn calculate_single(
        &self,
        file_path: &Path,
        algorithm: HashAlgorithm,
        file_size: u64,
        io_operations: &mut u64,
        progress_provider: &dyn ProgressProvider,
    ) -> Result<HashResult> {
        let start_time = Instant::now();
        let mut file = open_source(file_path).await?;
        let mut buffer = vec![0u8; self.buffer_size];
        let mut hasher = algorithm.create_hasher();

        loop {
            let n = read_chunk(&mut file, &mut buffer, file_path).await?;
            *io_operations += 1;
            if n == 0 {
                break;
            }

            hasher.update(&buffer[..n]);
            progress_provider.report(ProgressUpdate::HashProgress {
                algorithm: algorithm.display_name().to_string(),
                bytes_processed: hasher.bytes_processed(),
                total_bytes: file_size,
            });
        }

        let input_size = hasher.bytes_processed();
        Ok(HashResult {
            algorithm,
            hash: hasher.finalize(),
            input_size,
            duration: start_time.elapsed(),
        })
    }
}

#[async_trait]
impl HashingStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn execute_with_progress(
        &self,
        context: HashingContext,
        progress_provider: &dyn ProgressProvider,
    ) -> Result<StrategyResult> {
        let start_time = Instant::now();

        if context.algorithms.is_empty() {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "No algorithms specified",
            )));
        }

        let mut results = HashMap::new();
        let mut io_operations = 0u64;
        let mut bytes_read = 0u64;

        // One full read per algorithm; each pass owns its own file handle
        for &algorithm in &context.algorithms {
            let result = self
                .calculate_single(
                    &context.file_path,
                    algorithm,
                    context.file_size,
                    &mut io_operations,
                    progress_provider,
                )
                .await?;
            bytes_read += result.input_size;
            results.insert(algorithm, result);
        }

        Ok(StrategyResult {
            results,
            metrics: PerformanceMetrics::new(start_time.elapsed(), bytes_read, io_operations),
        })
    }
}
