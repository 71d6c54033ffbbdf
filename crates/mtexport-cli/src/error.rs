//! Error types for mtexport-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mtexport-hugo
    #[error(transparent)]
    Convert(#[from] mtexport_hugo::Error),

    /// Error from mtexport-parser
    #[error(transparent)]
    Parse(#[from] mtexport_parser::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
