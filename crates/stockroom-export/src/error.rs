//! Export error types.

use thiserror::Error;

/// Errors while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system failure (unwritable path, disk full).
    #[error("Export I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet writer failure.
    #[error("Spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF writer failure.
    #[error("PDF export failed: {0}")]
    Pdf(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
