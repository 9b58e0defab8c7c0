//! Error types shared by every stage of a sync run

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("git {command} failed: {stderr}")]
    VersionControl { command: String, stderr: String },

    #[error("Malformed document {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    #[error("Missing field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SyncError {
    pub(crate) fn transport(method: &str, url: &str, detail: impl std::fmt::Display) -> Self {
        SyncError::Transport(format!("{} {} - {}", method, url, detail))
    }
}
