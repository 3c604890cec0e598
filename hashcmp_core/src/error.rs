//! Error types for the hashcmp core library
//!
//! Errors are split by who has to act on them: the byte source failed
//! (I/O), the caller asked for something the engine does not offer
//! (validation), or the engine's own task bookkeeping broke (internal).

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hashcmp core library
///
/// A digest computation that returns any of these has been aborted;
/// no partial digest is ever handed back alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the byte source failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// The request itself was invalid (unknown algorithm, bad configuration)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Attach a path to an I/O error; other variants pass through untouched
    pub fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Self::Io(io_err) if io_err.path.is_none() => Self::Io(io_err.with_path(path)),
            other => other,
        }
    }
}
