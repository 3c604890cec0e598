//! Channel-backed [`ProgressProvider`] for the CLI

use hashcmp_core::progress::{ProgressProvider, ProgressUpdate};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Sends progress updates to a separate rendering task.
///
/// Children are named after the file they hash, and turn the engine's
/// per-chunk `HashProgress` into `FileProgress` for that file.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::UnboundedSender<ProgressUpdate>>>,
    name: Option<String>,
}

impl ChannelProvider {
    pub fn new(tx: mpsc::UnboundedSender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
            name: None,
        }
    }

    pub fn with_name(tx: mpsc::UnboundedSender<ProgressUpdate>, name: String) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
            name: Some(name),
        }
    }

    fn sender(&self) -> Option<mpsc::UnboundedSender<ProgressUpdate>> {
        self.tx.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        let update = match (&self.name, update) {
            (
                Some(name),
                ProgressUpdate::HashProgress {
                    algorithm,
                    bytes_processed,
                    total_bytes,
                },
            ) => ProgressUpdate::FileProgress {
                path: PathBuf::from(name),
                bytes_processed,
                total_bytes,
                operation: algorithm,
            },
            (_, other) => other,
        };

        // The renderer may already be gone
        if let Some(tx) = self.sender() {
            let _ = tx.send(update);
        }
    }

    fn create_child(&self, name: &str) -> Box<dyn ProgressProvider> {
        let child = Self {
            tx: Mutex::new(self.sender()),
            name: Some(name.to_string()),
        };
        Box::new(child)
    }

    fn complete(&self) {
        // Drop our sender so the renderer can exit its loop
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

/// Create a progress provider and the receiver its renderer reads
pub fn create_progress_infrastructure() -> (
    Arc<dyn ProgressProvider>,
    mpsc::UnboundedReceiver<ProgressUpdate>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}
