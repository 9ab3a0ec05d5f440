//! Report error types.

use dues_shared::AppError;
use thiserror::Error;

/// Errors that can occur while rendering a report.
///
/// Any of these means no document was produced.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Column widths and headers disagree in length.
    #[error("schema has {widths} column widths but {headers} headers")]
    SchemaMismatch {
        /// Number of widths.
        widths: usize,
        /// Number of headers.
        headers: usize,
    },

    /// Schema without columns.
    #[error("schema has no columns")]
    EmptySchema,

    /// A column with zero width.
    #[error("column {column} has zero width")]
    ZeroWidth {
        /// Zero-based column index.
        column: usize,
    },

    /// The PDF encoder failed.
    #[error("failed to encode document: {0}")]
    Encoding(String),

    /// The destination rejected the document.
    #[error("failed to write document: {0}")]
    Write(String),
}

impl RenderError {
    /// Create an encoding error.
    #[must_use]
    pub fn encoding(msg: impl ToString) -> Self {
        Self::Encoding(msg.to_string())
    }

    /// Create a write error.
    #[must_use]
    pub fn write(msg: impl ToString) -> Self {
        Self::Write(msg.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        Self::Render(err.to_string())
    }
}
