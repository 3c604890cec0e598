//! Multiple hash calculation strategy
//!
//! Calculates every requested algorithm in a single file pass. Best when
//! reading the file is the bottleneck.

use super::{
    HashingContext, HashingStrategy, PerformanceMetrics, StrategyResult, open_source, read_chunk,
};
use crate::hashing::{HashAlgorithm, HashResult, StreamingHasher};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::{Error, Result, error::ValidationError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;

/// Multiple strategy - calculate multiple algorithms in a single pass
pub struct MultipleStrategy {
    buffer_size: usize,
}

impl MultipleStrategy {
    /// Create a new multiple strategy with the specified buffer size
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Create with the default 64 KiB buffer
    pub fn with_defaults() -> Self {
        Self::new(super::DEFAULT_BUFFER_SIZE)
    }
}

#[async_trait]
impl HashingStrategy for MultipleStrategy {
    fn name(&self) -> &'static str {
        "multiple"
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

        let mut file = open_source(&context.file_path).await?;
        let mut buffer = vec![0u8; self.buffer_size];
        let mut bytes_processed = 0u64;
        let mut io_operations = 0u64;

        let mut hashers: Vec<(HashAlgorithm, Box<dyn StreamingHasher>)> = context
            .algorithms
            .iter()
            .map(|&algorithm| (algorithm, algorithm.create_hasher()))
            .collect();

        let label = format!("Multiple ({} algorithms)", hashers.len());
        loop {
            let n = read_chunk(&mut file, &mut buffer, &context.file_path).await?;
            io_operations += 1;
            if n == 0 {
                break;
            }

            // Same chunk, every hasher, in order
            let chunk = &buffer[..n];
            for (_, hasher) in hashers.iter_mut() {
                hasher.update(chunk);
            }
            bytes_processed += n as u64;

            progress_provider.report(ProgressUpdate::HashProgress {
                algorithm: label.clone(),
                bytes_processed,
                total_bytes: context.file_size,
            });
        }
        drop(file);

        let duration = start_time.elapsed();
        let results = hashers
            .into_iter()
            .map(|(algorithm, hasher)| {
                let result = HashResult {
                    algorithm,
                    hash: hasher.finalize(),
                    input_size: bytes_processed,
                    duration,
                };
                (algorithm, result)
            })
            .collect();

        Ok(StrategyResult {
            results,
            metrics: PerformanceMetrics::new(duration, bytes_processed, io_operations),
        })
    }
}
