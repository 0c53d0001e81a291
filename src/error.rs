//! Error handling for the tunefetch application
//!
//! Download routines report failures through [`FetchError`] so callers can
//! tell a missing tool from an empty search without parsing printed text.
//! Startup faults (configuration, output directory) surface as
//! [`TuneFetchError`] and end the process with a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuneFetchError {
    #[error("Download error: {0}")]
    Fetch(#[from] FetchError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure kinds of a single download routine.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Spotify client id and secret are not configured")]
    MissingCredentials,

    #[error("No results found for query: {query}")]
    NoSearchResults { query: String },

    #[error("'{tool}' is not installed or not in PATH")]
    ToolNotFound { tool: String },

    #[error("'{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from '{tool}': {reason}")]
    InvalidToolOutput { tool: String, reason: String },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Failed to tag {path}: {source}")]
    Tagging {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to determine project directories")]
    ProjectDirs,
}

pub type Result<T> = std::result::Result<T, TuneFetchError>;

/// Outcome of a single download routine; `Err` is the absence-of-result marker.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

impl From<std::io::Error> for TuneFetchError {
    fn from(err: std::io::Error) -> Self {
        TuneFetchError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<toml::de::Error> for TuneFetchError {
    fn from(err: toml::de::Error) -> Self {
        TuneFetchError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for TuneFetchError {
    fn from(err: toml::ser::Error) -> Self {
        TuneFetchError::Config(ConfigError::Serialize(err))
    }
}
