use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

/// Errors raised while reading inputs or writing working files.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Required inventory file does not exist
    #[error("Inventory file not found: {}", .0.display())]
    MissingInventory(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list working files in {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Working file parsed, but its top level is not a mapping
    #[error("Working file {} must be a YAML mapping", path.display())]
    NotAMapping { path: PathBuf },

    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Page path cannot be mapped to a working file inside the locale directory
    #[error("Invalid page path '{page}': {reason}")]
    InvalidPagePath { page: String, reason: String },

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
