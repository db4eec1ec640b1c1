//! # Spreadsheet Export
//!
//! Writes report rows into a single worksheet, one row per record, raw
//! values only: timestamp, product name, quantity, unit price. No headers
//! or cell formatting beyond what the values carry themselves.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::ExportResult;
use stockroom_core::SalesReportRow;

/// Writes the report rows to an `.xlsx` file at `path`.
pub fn write_xlsx(rows: &[SalesReportRow], path: &Path) -> ExportResult<()> {
    debug!(rows = rows.len(), path = %path.display(), "Writing spreadsheet export");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32;
        worksheet.write_string(r, 0, row.sold_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
        worksheet.write_string(r, 1, &row.product_name)?;
        worksheet.write_number(r, 2, row.quantity as f64)?;
        // Cents to major units only at this display edge.
        worksheet.write_number(r, 3, row.unit_price().as_major_units())?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn sample_rows() -> Vec<SalesReportRow> {
        vec![
            SalesReportRow {
                sold_at: DateTime::parse_from_rfc3339("2026-08-01T10:30:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                product_name: "Widget".to_string(),
                quantity: 3,
                unit_price_cents: 500,
            },
            SalesReportRow {
                sold_at: DateTime::parse_from_rfc3339("2026-08-02T09:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                product_name: "Hammer".to_string(),
                quantity: 1,
                unit_price_cents: 1250,
            },
        ]
    }

    #[test]
    fn test_write_xlsx_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        write_xlsx(&sample_rows(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_empty_report_still_writes_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_xlsx(&[], &path).unwrap();
        assert!(path.exists());
    }
}
