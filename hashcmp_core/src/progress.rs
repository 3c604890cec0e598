//! Progress reporting abstractions
//!
//! The engine reports through a trait object so that it never depends on
//! a particular UI. Front ends plug in a renderer, tests plug in a
//! recorder, everything else gets [`NullProvider`].

use std::path::PathBuf;

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Create a child provider for nested operations
    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider>;

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone)]
pub enum ProgressUpdate {
    /// File processing progress
    FileProgress {
        path: PathBuf,
        bytes_processed: u64,
        total_bytes: u64,
        operation: String,
    },

    /// Batch operation progress
    BatchProgress {
        current: usize,
        total: usize,
        current_file: Option<String>,
    },

    /// Hash calculation progress, sent after every chunk
    HashProgress {
        algorithm: String,
        bytes_processed: u64,
        total_bytes: u64,
    },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(NullProvider)
    }

    fn complete(&self) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Provider that records every update it receives
    #[derive(Default)]
    pub(crate) struct RecordingProvider {
        pub(crate) updates: Arc<Mutex<Vec<ProgressUpdate>>>,
    }

    impl RecordingProvider {
        pub(crate) fn received(&self) -> Vec<ProgressUpdate> {
            self.updates.lock().unwrap().clone()
        }
    }

    impl ProgressProvider for RecordingProvider {
        fn report(&self, update: ProgressUpdate) {
            self.updates.lock().unwrap().push(update);
        }

        fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
            Box::new(RecordingProvider {
                updates: Arc::clone(&self.updates),
            })
        }

        fn complete(&self) {}
    }

    #[test]
    fn test_null_provider() {
        let provider = NullProvider;

        provider.report(ProgressUpdate::HashProgress {
            algorithm: "md5".to_string(),
            bytes_processed: 64,
            total_bytes: 128,
        });

        let child = provider.create_child("test");
        child.report(ProgressUpdate::BatchProgress {
            current: 1,
            total: 1,
            current_file: Some("test".to_string()),
        });

        provider.complete();
    }

    #[test]
    fn test_recording_provider_child_shares_log() {
        let provider = RecordingProvider::default();

        provider.report(ProgressUpdate::FileProgress {
            path: PathBuf::from("/test/file.txt"),
            bytes_processed: 1024,
            total_bytes: 2048,
            operation: "Hashing".to_string(),
        });
        provider.create_child("child").report(ProgressUpdate::BatchProgress {
            current: 1,
            total: 3,
            current_file: None,
        });

        assert_eq!(provider.received().len(), 2);
    }
}
