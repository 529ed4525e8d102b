use thiserror::Error;

/// Main error type for Famtree
#[derive(Error, Debug)]
pub enum FamtreeError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree store (de)serialization errors
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation service errors
    #[error("Generation service error: {0}")]
    Generation(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using FamtreeError
pub type Result<T> = std::result::Result<T, FamtreeError>;
