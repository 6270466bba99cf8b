use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for lastmod operations
#[derive(Debug, Error)]
pub enum LastmodError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    // Config errors
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl LastmodError {
    /// The path the error is about, if it carries one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            LastmodError::FileRead { path, .. }
            | LastmodError::FileWrite { path, .. }
            | LastmodError::ReadDir { path, .. }
            | LastmodError::ConfigRead { path, .. } => Some(path),
            LastmodError::Io(_) | LastmodError::ConfigParse(_) => None,
        }
    }
}

/// Result type alias for lastmod operations
pub type Result<T> = std::result::Result<T, LastmodError>;
