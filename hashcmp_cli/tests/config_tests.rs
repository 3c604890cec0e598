//! Layered configuration: defaults, TOML file, environment

use hashcmp_cli::config::ConfigManager;
use hashcmp_cli::output::OutputFormat;
use hashcmp_core::StrategyHint;
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(temp_dir.path().join("config.toml"))
}

#[test]
fn test_set_creates_file_and_reads_back() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("engine.chunk_size", "4096").unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(config_manager.get("engine.chunk_size").unwrap(), "4096");
    assert_eq!(config_manager.load().unwrap().engine.chunk_size, 4096);
}

#[test]
fn test_set_preserves_other_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager
        .set("engine.strategy_hint", "prefer-parallel")
        .unwrap();
    config_manager.set("output.progress_enabled", "false").unwrap();
    config_manager.set("output.default_format", "CSV").unwrap();

    let config = config_manager.load().unwrap();
    assert_eq!(config.engine.strategy_hint, StrategyHint::PreferParallel);
    assert!(!config.output.progress_enabled);
    assert_eq!(config.output.format().unwrap(), OutputFormat::Csv);
}

#[test]
fn test_file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[engine]\nparallel_threshold = 1024\n\n[output]\ncolor_enabled = false\n",
    )
    .unwrap();

    let config = create_test_config_manager(&temp_dir).load().unwrap();
    assert_eq!(config.engine.parallel_threshold, 1024);
    assert!(!config.output.color_enabled);
    // Unset keys keep their defaults
    assert_eq!(config.output.default_format, "table");
    assert_eq!(config.engine.max_concurrent_files, 4);
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[engine]\nchunk_size = 0\n",
    )
    .unwrap();

    assert!(create_test_config_manager(&temp_dir).load().is_err());
}

#[test]
fn test_unknown_key_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("network.timeout_seconds", "5").is_err());
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_get_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.get("engine.nope").is_err());
    assert!(config_manager.get("engine").is_err());
}

#[test]
fn test_list_contains_every_key() {
    let temp_dir = TempDir::new().unwrap();
    let items = create_test_config_manager(&temp_dir).list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();

    assert_eq!(
        keys,
        [
            "engine.chunk_size",
            "engine.max_concurrent_files",
            "engine.parallel_threshold",
            "engine.strategy_hint",
            "output.color_enabled",
            "output.default_format",
            "output.progress_enabled",
        ]
    );
}

#[test]
fn test_show_renders_toml() {
    let temp_dir = TempDir::new().unwrap();
    let rendered = create_test_config_manager(&temp_dir).show().unwrap();

    let parsed: toml::Value = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed["engine"]["strategy_hint"].as_str(), Some("automatic"));
}
