//! Process-wide registry of hash algorithm implementations

use super::HashAlgorithm;
use super::algorithms::{BlockAlgorithm, md5::Md5, sha1::Sha1, sha256::Sha256};
use super::traits::HashAlgorithmImpl;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// The one place a [`HashAlgorithm`] is bound to its implementation
///
/// Built once on first access and read-only afterwards, so it is shared
/// freely between threads.
pub struct AlgorithmRegistry {
    md5: Arc<dyn HashAlgorithmImpl>,
    sha1: Arc<dyn HashAlgorithmImpl>,
    sha256: Arc<dyn HashAlgorithmImpl>,
}

impl AlgorithmRegistry {
    fn builtin() -> Self {
        Self {
            md5: Arc::new(BlockAlgorithm::<Md5>::new()),
            sha1: Arc::new(BlockAlgorithm::<Sha1>::new()),
            sha256: Arc::new(BlockAlgorithm::<Sha256>::new()),
        }
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(|| {
            let registry = Self::builtin();
            log::debug!("Registered hash algorithms: {:?}", registry.list());
            registry
        })
    }

    /// Implementation backing `algorithm`
    pub fn implementation(&self, algorithm: HashAlgorithm) -> Arc<dyn HashAlgorithmImpl> {
        let imp = match algorithm {
            HashAlgorithm::MD5 => &self.md5,
            HashAlgorithm::SHA1 => &self.sha1,
            HashAlgorithm::SHA256 => &self.sha256,
        };
        Arc::clone(imp)
    }

    /// Get algorithm by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn HashAlgorithmImpl>> {
        HashAlgorithm::ALL
            .into_iter()
            .map(|algorithm| self.implementation(algorithm))
            .find(|imp| imp.id() == id)
    }

    /// List all registered algorithm ids, in display order
    pub fn list(&self) -> Vec<&'static str> {
        HashAlgorithm::ALL
            .into_iter()
            .map(|algorithm| self.implementation(algorithm).id())
            .collect()
    }
}
