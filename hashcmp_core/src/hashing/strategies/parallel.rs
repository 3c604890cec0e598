//! Parallel hash calculation strategy
//!
//! Runs each algorithm on its own blocking worker over its own read of the
//! file. Workers share nothing but the path; progress flows back to the
//! async side through a channel.

use super::{HashingContext, HashingStrategy, PerformanceMetrics, StrategyResult};
use crate::hashing::{ChunkReader, HashAlgorithm, HashResult};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::{
    Error, Result,
    error::{InternalError, ValidationError},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Progress message from a worker: algorithm and bytes hashed so far
type WorkerProgress = (HashAlgorithm, u64);

/// Outcome of one worker: its result and the number of reads it made
type WorkerOutput = Result<(HashResult, u64)>;

/// Parallel strategy - one worker thread per algorithm
pub struct ParallelStrategy {
    buffer_size: usize,
}

impl ParallelStrategy {
    /// Create a new parallel strategy with the specified read size
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

/// Hash one file with one algorithm on the current (blocking) thread
fn hash_file_blocking(
    path: &Path,
    algorithm: HashAlgorithm,
    buffer_size: usize,
    progress_tx: &mpsc::UnboundedSender<WorkerProgress>,
) -> WorkerOutput {
    let start_time = Instant::now();
    let file = std::fs::File::open(path).map_err(|e| Error::from(e).with_path(path))?;

    let mut hasher = algorithm.create_hasher();
    let mut reads = 0u64;
    for chunk in ChunkReader::with_chunk_size(file, buffer_size) {
        let chunk = chunk.map_err(|e| Error::from(e).with_path(path))?;
        reads += 1;
        hasher.update(&chunk);
        // The receiver only goes away if the caller stopped listening
        let _ = progress_tx.send((algorithm, hasher.bytes_processed()));
    }

    let input_size = hasher.bytes_processed();
    let result = HashResult {
        algorithm,
        hash: hasher.finalize(),
        input_size,
        duration: start_time.elapsed(),
    };
    Ok((result, reads + 1))
}

#[async_trait]
impl HashingStrategy for ParallelStrategy {
    fn name(&self) -> &'static str {
        "parallel"
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

        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<WorkerProgress>();

        let workers: Vec<(HashAlgorithm, JoinHandle<WorkerOutput>)> = context
            .algorithms
            .iter()
            .map(|&algorithm| {
                let path: PathBuf = context.file_path.clone();
                let tx = progress_tx.clone();
                let buffer_size = self.buffer_size;
                let handle = tokio::task::spawn_blocking(move || {
                    hash_file_blocking(&path, algorithm, buffer_size, &tx)
                });
                (algorithm, handle)
            })
            .collect();

        // Channel closes once every worker has dropped its sender
        drop(progress_tx);
        while let Some((algorithm, bytes_processed)) = progress_rx.recv().await {
            progress_provider.report(ProgressUpdate::HashProgress {
                algorithm: algorithm.display_name().to_string(),
                bytes_processed,
                total_bytes: context.file_size,
            });
        }

        let mut results = HashMap::new();
        let mut io_operations = 0u64;
        let mut bytes_read = 0u64;
        let mut first_error = None;

        for (algorithm, handle) in workers {
            let outcome = handle.await.map_err(|e| {
                Error::Internal(InternalError::worker_failed(algorithm.id(), e.to_string()))
            });
            match outcome.and_then(|output| output) {
                Ok((result, reads)) => {
                    io_operations += reads;
                    bytes_read += result.input_size;
                    results.insert(algorithm, result);
                }
                Err(e) => {
                    log::debug!("{} worker failed: {e}", algorithm.display_name());
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        Ok(StrategyResult {
            results,
            metrics: PerformanceMetrics::new(start_time.elapsed(), bytes_read, io_operations),
        })
    }
}
