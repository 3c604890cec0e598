//! One-bit tampered copies
//!
//! Used to show how every digest changes completely when a single bit of
//! the input does.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TamperError {
    #[error("--tamper not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `dir/name.ext` becomes `dir/name_tampered.ext`
pub fn tampered_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{stem}_tampered.{}", ext.to_string_lossy()),
        None => format!("{stem}_tampered"),
    };
    source.with_file_name(name)
}

/// Flip the lowest bit of the byte at `index`, clamped into range.
///
/// Empty input is first extended to a single zero byte.
pub fn flip_bit(data: &mut Vec<u8>, index: i64) {
    if data.is_empty() {
        data.push(0);
    }
    let last = (data.len() - 1) as i64;
    let position = index.clamp(0, last) as usize;
    data[position] ^= 0x01;
}

/// Write a tampered copy of `source` next to it and return its path
pub fn make_tampered_copy(source: &Path, index: i64) -> Result<PathBuf, TamperError> {
    if !source.is_file() {
        return Err(TamperError::SourceNotFound(source.to_path_buf()));
    }

    let mut data = fs::read(source).map_err(|source_err| TamperError::Io {
        action: "read",
        path: source.to_path_buf(),
        source: source_err,
    })?;
    flip_bit(&mut data, index);

    let destination = tampered_path(source);
    fs::write(&destination, &data).map_err(|source_err| TamperError::Io {
        action: "write",
        path: destination.clone(),
        source: source_err,
    })?;
    log::debug!(
        "Wrote tampered copy of {} to {}",
        source.display(),
        destination.display()
    );

    Ok(destination)
}
