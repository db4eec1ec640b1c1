//! # stockroom-export: Report Export Adapters
//!
//! Stateless one-shot conversions of an ordered sequence of
//! [`SalesReportRow`]s into files. The caller supplies the rows (already
//! ordered by the service) and a target path; nothing here talks to the
//! database.
//!
//! - [`xlsx::write_xlsx`] - spreadsheet, one worksheet, raw values
//! - [`pdf::write_pdf`] - naive top-down text dump on a single PDF page
//!
//! [`SalesReportRow`]: stockroom_core::SalesReportRow

pub mod error;
pub mod pdf;
pub mod xlsx;

pub use error::{ExportError, ExportResult};
pub use pdf::write_pdf;
pub use xlsx::write_xlsx;
