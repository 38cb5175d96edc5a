//! Store trait and output errors

use crate::article::ArticleRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize article {id}: {message}")]
    Serialize { id: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for extracted articles
///
/// Both writes are keyed by the record's id and overwrite earlier output for
/// the same id.
pub trait ArticleStore {
    /// Writes the article body as plain text
    fn write_raw(&self, article: &ArticleRecord) -> OutputResult<()>;

    /// Writes the article metadata (everything but the body)
    fn write_meta(&self, article: &ArticleRecord) -> OutputResult<()>;
}
