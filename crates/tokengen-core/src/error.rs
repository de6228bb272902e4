use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the whole compiler run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: top-level value must be a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("config error: {0}")]
    Config(String),
}

/// Per-token failures. The offending token is dropped; the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    #[error("invalid size format: {0}")]
    InvalidSizeFormat(String),
}
