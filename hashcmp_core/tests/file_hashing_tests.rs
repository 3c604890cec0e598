//! File hashing through every strategy must agree with in-memory hashing

use hashcmp_core::{
    EngineConfig, FileProcessor, HashAlgorithm, HashCalculator, NullProvider, ProgressProvider,
    ProgressUpdate, StrategyHint, digest, digest_bytes,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, len: usize) -> (PathBuf, Vec<u8>) {
    let data: Vec<u8> = (0..len).map(|i| (i % 253) as u8 ^ 0x3c).collect();
    let path = dir.path().join(name);
    std::fs::write(&path, &data).unwrap();
    (path, data)
}

#[derive(Default)]
struct CountingProvider {
    hash_updates: Arc<Mutex<usize>>,
}

impl ProgressProvider for CountingProvider {
    fn report(&self, update: ProgressUpdate) {
        if matches!(update, ProgressUpdate::HashProgress { .. }) {
            *self.hash_updates.lock().unwrap() += 1;
        }
    }

    fn create_child(&self, _name: &str) -> Box<dyn ProgressProvider> {
        Box::new(CountingProvider {
            hash_updates: Arc::clone(&self.hash_updates),
        })
    }

    fn complete(&self) {}
}

#[tokio::test]
async fn test_all_hints_produce_identical_digests() {
    let dir = TempDir::new().unwrap();
    let (path, data) = write_file(&dir, "sample.bin", 200_003);

    for hint in [
        StrategyHint::Automatic,
        StrategyHint::PreferSequential,
        StrategyHint::PreferParallel,
    ] {
        let results = HashCalculator::with_hint(hint)
            .calculate_multiple(&path, &HashAlgorithm::ALL)
            .await
            .unwrap();

        for algorithm in HashAlgorithm::ALL {
            assert_eq!(
                results[&algorithm].hash,
                digest_bytes(algorithm, &data),
                "{algorithm} with {hint:?}"
            );
            assert_eq!(results[&algorithm].input_size, 200_003);
        }
    }
}

#[tokio::test]
async fn test_parallel_threshold_from_config() {
    let dir = TempDir::new().unwrap();
    // Above the 16 KiB test threshold, so three algorithms go parallel
    let (path, data) = write_file(&dir, "big.bin", 40_000);

    let config = EngineConfig::test();
    let calculator = HashCalculator::from_config(&config);
    let provider = CountingProvider::default();
    let results = calculator
        .calculate_multiple_with_progress(&path, &HashAlgorithm::ALL, &provider)
        .await
        .unwrap();

    for algorithm in HashAlgorithm::ALL {
        assert_eq!(results[&algorithm].hash, digest_bytes(algorithm, &data));
    }
    // 1 KiB reads, 40 chunks per worker
    assert!(*provider.hash_updates.lock().unwrap() >= 3 * 40);
}

#[tokio::test]
async fn test_duplicate_algorithms_are_hashed_once() {
    let dir = TempDir::new().unwrap();
    let (path, _) = write_file(&dir, "dup.bin", 100);

    let results = HashCalculator::new()
        .calculate_multiple(&path, &[HashAlgorithm::SHA1, HashAlgorithm::SHA1])
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_empty_algorithm_list_returns_nothing() {
    let dir = TempDir::new().unwrap();
    let (path, _) = write_file(&dir, "none.bin", 10);

    let results = HashCalculator::new()
        .calculate_multiple(&path, &[])
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_blocking_digest_of_file_handle() {
    let dir = TempDir::new().unwrap();
    let (path, data) = write_file(&dir, "blocking.bin", 8 * 1024 * 3 + 1);

    for algorithm in HashAlgorithm::ALL {
        let file = std::fs::File::open(&path).unwrap();
        assert_eq!(digest(algorithm, file).unwrap(), digest_bytes(algorithm, &data));
    }
}

#[tokio::test]
async fn test_processor_batch_over_mixed_sizes() {
    let dir = TempDir::new().unwrap();
    let files: Vec<(PathBuf, Vec<u8>)> = [0usize, 55, 56, 64, 65, 20_000]
        .iter()
        .enumerate()
        .map(|(i, &len)| write_file(&dir, &format!("f{i}.bin"), len))
        .collect();
    let paths: Vec<PathBuf> = files.iter().map(|(p, _)| p.clone()).collect();

    let results = FileProcessor::new(EngineConfig::test())
        .process_files(&paths, &HashAlgorithm::ALL, &NullProvider)
        .await
        .unwrap();

    for (result, (path, data)) in results.iter().zip(&files) {
        assert_eq!(&result.file_path, path);
        assert_eq!(result.file_size, data.len() as u64);
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(result.hashes[&algorithm], digest_bytes(algorithm, data));
        }
    }
}
