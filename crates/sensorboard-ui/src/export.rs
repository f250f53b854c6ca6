//! Spreadsheet export
//!
//! Rows are projected by the caller into [`ExportRow`]s whose values are
//! already in header order; the engine only lays them out in a grid and
//! writes a single-sheet workbook.

use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use sensorboard_core::time::file_date;
use thiserror::Error;

/// Name of the only worksheet in every exported workbook
pub const SHEET_NAME: &str = "Sheet1";

/// Worksheet limits of the xlsx format
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Workbook(#[from] XlsxError),

    #[error("Too many rows to export: {0}")]
    TooManyRows(usize),

    #[error("Too many columns to export: {0}")]
    TooManyColumns(usize),
}

/// A primitive spreadsheet value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric when the value parses as a number, text otherwise
    pub fn nominal(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => CellValue::Number(number),
            _ => CellValue::Text(value.to_string()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One record projected for export, values in header order
pub type ExportRow = Vec<CellValue>;

/// Header row followed by every export row
pub fn build_grid(headers: &[&str], rows: Vec<ExportRow>) -> Vec<Vec<CellValue>> {
    let mut grid = Vec::with_capacity(rows.len() + 1);
    grid.push(headers.iter().map(|h| CellValue::from(*h)).collect());
    grid.extend(rows);
    grid
}

/// Write the grid into a one-sheet workbook and return the file bytes
pub fn write_workbook(grid: &[Vec<CellValue>]) -> Result<Vec<u8>, ExportError> {
    if grid.len() > MAX_ROWS {
        return Err(ExportError::TooManyRows(grid.len()));
    }
    if let Some(row) = grid.iter().find(|row| row.len() > MAX_COLUMNS) {
        return Err(ExportError::TooManyColumns(row.len()));
    }

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    for (r, row) in grid.iter().enumerate() {
        let r = u32::try_from(r).map_err(|_| ExportError::TooManyRows(grid.len()))?;
        for (c, value) in row.iter().enumerate() {
            let c = u16::try_from(c).map_err(|_| ExportError::TooManyColumns(row.len()))?;
            match value {
                CellValue::Number(number) => worksheet.write_number(r, c, *number)?,
                CellValue::Text(text) => worksheet.write_string(r, c, text)?,
            };
        }
    }

    workbook.push_worksheet(worksheet);
    Ok(workbook.save_to_buffer()?)
}

/// `"<label> <DD-MM-YYYY>.xlsx"`
pub fn export_filename(label: &str, date: NaiveDate) -> String {
    format!("{} {}.xlsx", label, file_date(date))
}
