//! Error types for mtexport-hugo
//!
//! [`Error`] aborts a whole conversion run. [`EntryError`] is scoped to a
//! single entry and never stops the batch.

use std::path::PathBuf;

/// Result type for run-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural error in the export
    #[error(transparent)]
    Parse(#[from] mtexport_parser::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown time zone: {name}")]
    InvalidTimeZone { name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that skip a single entry
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("Unsupported status: {value}")]
    UnsupportedStatus { value: String },

    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    #[error("Local time {value} does not exist in {zone}")]
    NonexistentLocalTime { value: String, zone: String },

    #[error("Unsupported multiline section key: {key}")]
    UnsupportedSection { key: String },

    #[error("Missing required field: {key}")]
    MissingField { key: &'static str },

    #[error("Basename is not a safe relative path: {basename:?}")]
    UnsafeBasename { basename: String },

    #[error("Failed to render front matter: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl EntryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
