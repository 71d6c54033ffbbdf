//! Error types for mtexport-parser

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors that abort a whole parse call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying stream failed
    #[error("I/O error while reading export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line} is not valid UTF-8")]
    InvalidEncoding { line: usize },

    /// An entry boundary appeared before the block was closed
    #[error("Unterminated {key} block opened at line {start_line}: entry boundary at line {line}")]
    UnterminatedBlock {
        key: String,
        start_line: usize,
        line: usize,
    },

    /// End of input was reached inside a block
    #[error("Unterminated {key} block opened at line {start_line}: unexpected end of input")]
    UnexpectedEof { key: String, start_line: usize },
}

impl Error {
    /// The 1-based line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::InvalidEncoding { line } => Some(*line),
            Self::UnterminatedBlock { line, .. } => Some(*line),
            Self::UnexpectedEof { start_line, .. } => Some(*start_line),
        }
    }
}
