//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// A strategy finished without producing a digest it was asked for
    #[error("Hash calculation failed for algorithm '{algorithm}': {message}")]
    HashCalculation { algorithm: String, message: String },

    /// A blocking hash worker panicked or was cancelled
    #[error("Hash worker for '{algorithm}' failed: {message}")]
    WorkerFailed { algorithm: String, message: String },
}

impl InternalError {
    /// Create a hash calculation error
    pub fn hash_calculation(algorithm: &str, message: &str) -> Self {
        Self::HashCalculation {
            algorithm: algorithm.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a worker failure error
    pub fn worker_failed(algorithm: &str, message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            algorithm: algorithm.to_string(),
            message: message.into(),
        }
    }
}
