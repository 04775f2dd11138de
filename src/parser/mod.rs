//! Parser layer for reading tabular files into tables

mod csv;
mod excel;
mod json;
mod parquet;

use std::path::Path;

use anyhow::{bail, Result};
use log::warn;

use crate::config::Config;
use crate::convert::{as_boolean, as_byte, as_double, as_integer, as_string};
use crate::model::{CellValue, DataType, Table};

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;
pub use self::json::JsonParser;
pub use self::parquet::ParquetParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser),
                Box::new(ExcelParser),
                Box::new(ParquetParser),
                Box::new(JsonParser),
            ],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }
}

/// Fit a ragged row to `width` cells, padding with `fill`
pub(crate) fn fit_row<T: Clone>(mut cells: Vec<T>, width: usize, fill: T, line: usize) -> Vec<T> {
    if cells.len() != width {
        warn!(
            "line {}: {} value(s) for {} column(s), {}",
            line,
            cells.len(),
            width,
            if cells.len() < width { "padding with NA" } else { "dropping extras" }
        );
        cells.resize(width, fill);
    }
    cells
}

/// Build a table from text cells, inferring each column's type.
/// Columns with a declared type keep their text for the frame builder to coerce.
pub(crate) fn table_from_text(
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    config: &Config,
) -> Result<Table> {
    let column_types: Vec<DataType> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            config.declared_type(name).unwrap_or_else(|| {
                infer_text_type(rows.iter().map(|r| r[i].as_str()).filter(|t| !config.is_na(t)))
            })
        })
        .collect();

    let mut table = Table::new(headers, column_types.clone())?;
    for row in rows {
        let cells = row
            .into_iter()
            .zip(&column_types)
            .enumerate()
            .map(|(i, (text, data_type))| {
                if config.is_na(&text) {
                    CellValue::Null
                } else if config.declared_type(&table.headers[i]).is_some() {
                    CellValue::String(text)
                } else {
                    conform(CellValue::String(text), *data_type)
                }
            })
            .collect();
        table.push_row(cells)?;
    }
    Ok(table)
}

/// Build a table from already typed cells, widening each column to fit its values
pub(crate) fn table_from_values(
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    config: &Config,
) -> Result<Table> {
    let column_types: Vec<DataType> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            config.declared_type(name).unwrap_or_else(|| {
                rows.iter()
                    .filter_map(|r| r[i].data_type())
                    .reduce(widen)
                    .unwrap_or(DataType::String)
            })
        })
        .collect();

    let mut table = Table::new(headers, column_types.clone())?;
    for row in rows {
        let cells = row
            .into_iter()
            .zip(&column_types)
            .enumerate()
            .map(|(i, (value, data_type))| {
                if config.declared_type(&table.headers[i]).is_some() {
                    value
                } else {
                    conform(value, *data_type)
                }
            })
            .collect();
        table.push_row(cells)?;
    }
    Ok(table)
}

/// Narrowest type whose parser accepts every text
fn infer_text_type<'a>(texts: impl Iterator<Item = &'a str> + Clone) -> DataType {
    let mut texts = texts.peekable();
    if texts.peek().is_none() {
        return DataType::String;
    }
    if texts.clone().all(|t| t.parse::<i32>().is_ok()) {
        DataType::Integer
    } else if texts.clone().all(|t| t.parse::<f64>().is_ok()) {
        DataType::Double
    } else if texts.all(|t| t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("false")) {
        DataType::Boolean
    } else {
        DataType::String
    }
}

/// Widen a column type to accommodate another value type
pub(crate) fn widen(a: DataType, b: DataType) -> DataType {
    if a == b {
        return a;
    }
    match (a, b) {
        (DataType::Byte, DataType::Integer) | (DataType::Integer, DataType::Byte) => {
            DataType::Integer
        }
        (DataType::Integer | DataType::Byte, DataType::Double)
        | (DataType::Double, DataType::Integer | DataType::Byte) => DataType::Double,
        _ => DataType::String,
    }
}

/// Represent a value in its column's type; values that do not fit fall back to text
fn conform(value: CellValue, data_type: DataType) -> CellValue {
    if value.is_null() {
        return value;
    }
    let conformed = match data_type {
        DataType::Integer => as_integer(&value).ok().map(CellValue::Int),
        DataType::Double => as_double(&value).ok().map(CellValue::Double),
        DataType::Boolean => Some(CellValue::Bool(as_boolean(&value))),
        DataType::String => Some(CellValue::String(as_string(&value))),
        DataType::Byte => as_byte(&value).ok().map(CellValue::Byte),
    };
    conformed.unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_text_type() {
        assert_eq!(infer_text_type(["1", "-2"].into_iter()), DataType::Integer);
        assert_eq!(infer_text_type(["1", "2.5"].into_iter()), DataType::Double);
        assert_eq!(infer_text_type(["TRUE", "false"].into_iter()), DataType::Boolean);
        assert_eq!(infer_text_type(["01", "abc"].into_iter()), DataType::String);
        assert_eq!(infer_text_type([].into_iter()), DataType::String);
    }

    #[test]
    fn test_widen() {
        assert_eq!(widen(DataType::Integer, DataType::Double), DataType::Double);
        assert_eq!(widen(DataType::Byte, DataType::Integer), DataType::Integer);
        assert_eq!(widen(DataType::Boolean, DataType::Integer), DataType::String);
    }

    #[test]
    fn test_text_table_keeps_declared_columns_raw() {
        let config = Config::default().with_column_type("code", DataType::Integer);
        let table = table_from_text(
            vec!["code".into(), "n".into()],
            vec![vec!["abc".into(), "1".into()], vec!["NA".into(), "2".into()]],
            &config,
        )
        .unwrap();

        assert_eq!(table.column_types, vec![DataType::Integer, DataType::Integer]);
        assert_eq!(table.rows[0], vec![CellValue::from("abc"), CellValue::Int(1)]);
        assert_eq!(table.rows[1], vec![CellValue::Null, CellValue::Int(2)]);
    }

    #[test]
    fn test_values_table_widens() {
        let table = table_from_values(
            vec!["x".into(), "y".into()],
            vec![
                vec![CellValue::Int(1), CellValue::Bool(true)],
                vec![CellValue::Double(2.5), CellValue::from("s")],
            ],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(table.column_types, vec![DataType::Double, DataType::String]);
        assert_eq!(table.rows[0], vec![CellValue::Double(1.0), CellValue::from("true")]);
    }

    #[test]
    fn test_fit_row() {
        assert_eq!(fit_row(vec![1], 3, 0, 2), vec![1, 0, 0]);
        assert_eq!(fit_row(vec![1, 2, 3], 2, 0, 2), vec![1, 2]);
    }
}
