//! Excel file parser (xlsx, xls, ods)

use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::config::Config;
use crate::model::{CellValue, Table};

use super::{fit_row, table_from_values, Parser};

/// Parser for Excel files
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

        // Get sheet name
        let sheet_name = if let Some(ref name) = config.sheet_name {
            name.clone()
        } else {
            // Use first sheet
            let sheets = workbook.sheet_names();
            if sheets.is_empty() {
                bail!("No sheets found in workbook");
            }
            sheets[0].clone()
        };

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        parse_range(&range, config)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "xlsx" | "xls" | "ods" | "xlsm")
    }
}

fn parse_range(range: &Range<Data>, config: &Config) -> Result<Table> {
    let mut sheet_rows = range.rows();

    // First row is header
    let header_row = sheet_rows.next().context("Empty sheet")?;
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = header_text(cell);
            if name.is_empty() {
                format!("Column{}", i + 1)
            } else {
                name
            }
        })
        .collect();

    let rows: Vec<Vec<CellValue>> = sheet_rows
        .enumerate()
        .map(|(line_num, row)| {
            let cells = row.iter().map(|cell| convert_cell(cell, config)).collect();
            fit_row(cells, headers.len(), CellValue::Null, line_num + 2)
        })
        .collect();

    table_from_values(headers, rows, config)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data, config: &Config) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if config.is_na(s.trim()) {
                CellValue::Null
            } else {
                CellValue::String(s.clone())
            }
        }
        Data::Float(f) => {
            // Whole numbers in integer range are integers
            if f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX) {
                CellValue::Int(*f as i32)
            } else {
                CellValue::Double(*f)
            }
        }
        Data::Int(i) => match i32::try_from(*i) {
            Ok(i) => CellValue::Int(i),
            Err(_) => CellValue::Double(*i as f64),
        },
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::String(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#{:?}", e)),
    }
}
