//! Error types for export operations.
//!
//! Formatting and XML generation cannot fail. Errors only come from the ZIP
//! container limits and from I/O when output is written to a sink.
use thiserror::Error;

/// Main error type for tabex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] tabex_zip::Error),
}

/// Result type for tabex operations.
pub type Result<T> = std::result::Result<T, Error>;
