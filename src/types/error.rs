use thiserror::Error;

/// gistory error types
#[derive(Error, Debug)]
pub enum GistoryError {
    /// Invalid user-supplied argument
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Input data could not be turned into a pattern
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository write failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Malformed input (settings file, font asset, dates)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for gistory
pub type Result<T> = std::result::Result<T, GistoryError>;
