use crate::models::{AggregatedOutput, Revenue};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::Path;

pub const SHEET_NAME: &str = "All Shops Data";

pub const HEADERS: [&str; 7] = [
    "Name",
    "Creator",
    "Account Type",
    "Revenue",
    "Product",
    "Live",
    "Shop Name",
];

const REVENUE_COLUMN: u16 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Write the accumulated output to `path`, replacing any earlier workbook.
///
/// Empty output produces a workbook with a single blank sheet.
pub fn write_workbook(output: &AggregatedOutput, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    if !output.is_empty() {
        let bold = Format::new().set_bold();
        for (col, title) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &bold)?;
        }

        for (i, record) in output.records().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &record.name)?;
            sheet.write_string(row, 1, &record.creator)?;
            sheet.write_string(row, 2, &record.account_type)?;
            match &record.revenue {
                Revenue::Parsed(Some(value)) => {
                    sheet.write_number(row, REVENUE_COLUMN, *value)?;
                }
                Revenue::Parsed(None) => {}
                Revenue::Raw(text) => {
                    sheet.write_string(row, REVENUE_COLUMN, text)?;
                }
            }
            sheet.write_string(row, 4, &record.product)?;
            sheet.write_string(row, 5, &record.live)?;
            sheet.write_string(row, 6, &record.shop_name)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Persist the output, logging instead of failing. Returns whether the write succeeded.
pub fn save_data(output: &AggregatedOutput, path: &Path) -> bool {
    match write_workbook(output, path) {
        Ok(()) if output.is_empty() => {
            log::info!("No rows collected. Created empty file at {}", path.display());
            true
        }
        Ok(()) => {
            log::info!("Saved combined data to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Failed to save final data: {}", e);
            false
        }
    }
}
