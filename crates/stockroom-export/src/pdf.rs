//! # PDF Export
//!
//! Naive top-down text dump: one `Display` line per report row, drawn at
//! decreasing vertical offsets on a single A4 page.
//!
//! Deliberately does NOT paginate - a report taller than the page simply
//! runs off the bottom. That mirrors the behavior this tool replaces and is
//! a cosmetic limitation, not a correctness issue.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use stockroom_core::SalesReportRow;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 15.0;
const TOP_START_MM: f32 = 280.0;
const LINE_STEP_MM: f32 = 7.0;
const FONT_SIZE_PT: f32 = 11.0;

/// Writes the report rows as plain text lines to a PDF file at `path`.
pub fn write_pdf(rows: &[SalesReportRow], path: &Path) -> ExportResult<()> {
    debug!(rows = rows.len(), path = %path.display(), "Writing PDF export");

    let (doc, page, layer) = PdfDocument::new(
        "Sales report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);

    let mut y = TOP_START_MM;
    for row in rows {
        layer.use_text(row.to_string(), FONT_SIZE_PT, Mm(LEFT_MARGIN_MM), Mm(y), &font);
        y -= LINE_STEP_MM;
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn row(name: &str) -> SalesReportRow {
        SalesReportRow {
            sold_at: DateTime::parse_from_rfc3339("2026-08-01T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            product_name: name.to_string(),
            quantity: 2,
            unit_price_cents: 750,
        }
    }

    #[test]
    fn test_write_pdf_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        write_pdf(&[row("Widget"), row("Hammer")], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_oversized_report_still_writes_without_pagination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");

        // Far more lines than fit on one page; lines run off the bottom.
        let rows: Vec<SalesReportRow> = (0..200).map(|i| row(&format!("Item {i}"))).collect();
        write_pdf(&rows, &path).unwrap();
        assert!(path.exists());
    }
}
