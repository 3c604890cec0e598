//! File-level processing on top of the hash calculator

use crate::hashing::{HashAlgorithm, HashCalculator};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::{EngineConfig, Result, error::ValidationError};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of file processing
#[derive(Debug, Clone, Serialize)]
pub struct FileProcessingResult {
    pub file_path: PathBuf,
    pub file_size: u64,
    /// Hex digests, ordered MD5, SHA-1, SHA-256
    pub hashes: BTreeMap<HashAlgorithm, String>,
    pub processing_time: Duration,
}

/// File processor for handling file operations
#[derive(Debug, Clone)]
pub struct FileProcessor {
    config: EngineConfig,
    hash_calculator: HashCalculator,
}

impl FileProcessor {
    /// Create a new file processor with configuration
    pub fn new(config: EngineConfig) -> Self {
        let hash_calculator = HashCalculator::from_config(&config);
        Self {
            config,
            hash_calculator,
        }
    }

    /// The configuration this processor was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hash a single file with the specified algorithms
    pub async fn process_file(
        &self,
        file_path: &Path,
        algorithms: &[HashAlgorithm],
        progress_provider: &dyn ProgressProvider,
    ) -> Result<FileProcessingResult> {
        let start_time = Instant::now();
        if algorithms.is_empty() {
            return Err(ValidationError::invalid_configuration("No algorithms specified").into());
        }
        log::debug!("Processing {}", file_path.display());

        let results = self
            .hash_calculator
            .calculate_multiple_with_progress(file_path, algorithms, progress_provider)
            .await?;

        let file_size = results
            .values()
            .map(|r| r.input_size)
            .next()
            .unwrap_or_default();
        let hashes = results
            .into_iter()
            .map(|(algorithm, result)| (algorithm, result.hash))
            .collect();

        let processing_time = start_time.elapsed();
        log::debug!(
            "Finished {} ({file_size} bytes) in {processing_time:?}",
            file_path.display()
        );

        Ok(FileProcessingResult {
            file_path: file_path.to_path_buf(),
            file_size,
            hashes,
            processing_time,
        })
    }

    /// Hash several files, at most `max_concurrent_files` at a time.
    ///
    /// Results come back in input order. The first failure aborts the
    /// batch.
    pub async fn process_files(
        &self,
        file_paths: &[PathBuf],
        algorithms: &[HashAlgorithm],
        progress_provider: &dyn ProgressProvider,
    ) -> Result<Vec<FileProcessingResult>> {
        let total = file_paths.len();
        let concurrency = self.config.max_concurrent_files.max(1);

        stream::iter(file_paths.iter().enumerate())
            .map(|(index, path)| async move {
                let child = progress_provider.create_child(&path.display().to_string());
                let result = self.process_file(path, algorithms, child.as_ref()).await;
                progress_provider.report(ProgressUpdate::BatchProgress {
                    current: index + 1,
                    total,
                    current_file: Some(path.display().to_string()),
                });
                result
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
