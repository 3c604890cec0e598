use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ABC_MD5: &str = "900150983cd24fb0d6963f7d28e17f72";
const ABC_SHA1: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

/// A command isolated from the user's configuration
fn hashcmp(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hashcmp").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("HASHCMP_OUTPUT__DEFAULT_FORMAT")
        .env_remove("HASHCMP_ENGINE__CHUNK_SIZE");
    cmd
}

fn json_rows(output: &[u8]) -> Vec<serde_json::Value> {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    hashcmp(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_compare_single_file_table() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abc.txt");
    fs::write(&file, b"abc").unwrap();

    hashcmp(home.path())
        .arg("compare")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("| File"))
        .stdout(predicate::str::contains("Size(bytes)"))
        .stdout(predicate::str::contains("SHA-256"))
        .stdout(predicate::str::contains(ABC_MD5))
        .stdout(predicate::str::contains(ABC_SHA1))
        .stdout(predicate::str::contains(ABC_SHA256));
}

#[test]
fn test_compare_single_algorithm_json() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abc.txt");
    fs::write(&file, b"abc").unwrap();

    let output = hashcmp(home.path())
        .args(["compare", "--algorithm", "sha1", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows = json_rows(&output.stdout);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["size"], 3);
    assert_eq!(rows[0]["hashes"]["sha1"], ABC_SHA1);
    assert!(rows[0]["hashes"].get("md5").is_none());
}

#[test]
fn test_compare_folder_skips_metadata_and_duplicates() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.bin"), b"a").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("b.bin"), b"b").unwrap();
    fs::write(dir.path().join(".DS_Store"), b"").unwrap();
    fs::write(dir.path().join("nested").join("Thumbs.db"), b"").unwrap();

    let output = hashcmp(home.path())
        .args(["compare", "--format", "csv"])
        .arg(dir.path())
        .arg(dir.path().join("a.bin"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "File,Size(bytes),MD5,SHA-1,SHA-256");
    assert_eq!(lines.len(), 3, "{stdout}");
    assert!(!stdout.contains(".DS_Store"));
    assert!(!stdout.contains("Thumbs.db"));
}

#[test]
fn test_compare_exclude_pattern() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keep.txt"), b"keep").unwrap();
    fs::write(dir.path().join("skip.tmp"), b"skip").unwrap();

    hashcmp(home.path())
        .args(["compare", "--exclude", "*.tmp"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.txt"))
        .stdout(predicate::str::contains("skip.tmp").not());
}

#[test]
fn test_compare_with_tampered_copy() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abc.txt");
    fs::write(&file, b"abc").unwrap();

    let output = hashcmp(home.path())
        .args(["compare", "--format", "json", "--index", "2", "--tamper"])
        .arg(&file)
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let tampered = dir.path().join("abc_tampered.txt");
    assert_eq!(fs::read(&tampered).unwrap(), b"abb");

    let rows = json_rows(&output.stdout);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["hashes"]["md5"], ABC_MD5);
    assert!(rows[1]["file"].as_str().unwrap().ends_with("abc_tampered.txt"));
    assert_ne!(rows[1]["hashes"]["md5"], ABC_MD5);
    assert_ne!(rows[1]["hashes"]["sha1"], ABC_SHA1);
    assert_ne!(rows[1]["hashes"]["sha256"], ABC_SHA256);
}

#[test]
fn test_tamper_source_missing() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.bin"), b"a").unwrap();

    hashcmp(home.path())
        .arg("compare")
        .arg(dir.path())
        .arg("--tamper")
        .arg(dir.path().join("missing.bin"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[error] --tamper not found"));
}

#[test]
fn test_no_files_found() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".DS_Store"), b"").unwrap();

    hashcmp(home.path())
        .arg("compare")
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No files found."));
}

#[test]
fn test_compare_requires_inputs() {
    let home = TempDir::new().unwrap();
    hashcmp(home.path()).arg("compare").assert().failure();
}

#[test]
fn test_default_format_from_environment() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abc.txt");
    fs::write(&file, b"abc").unwrap();

    hashcmp(home.path())
        .env("HASHCMP_OUTPUT__DEFAULT_FORMAT", "csv")
        .arg("compare")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("File,Size(bytes)"));
}

#[test]
fn test_config_set_then_used_by_compare() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abc.txt");
    fs::write(&file, b"abc").unwrap();

    hashcmp(home.path())
        .args(["config", "set", "output.default_format", "json"])
        .assert()
        .success();
    assert!(home.path().join("hashcmp").join("config.toml").exists());

    hashcmp(home.path())
        .args(["config", "get", "output.default_format"])
        .assert()
        .success()
        .stdout("json\n");

    hashcmp(home.path())
        .arg("compare")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_config_path_and_show() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("custom.toml");

    hashcmp(home.path())
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));

    hashcmp(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[engine]"))
        .stdout(predicate::str::contains("default_format = \"table\""));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let home = TempDir::new().unwrap();
    hashcmp(home.path())
        .args(["config", "set", "engine.chunk_size", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("chunk_size"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    hashcmp(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hashcmp"));
}
