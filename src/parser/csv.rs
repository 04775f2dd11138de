//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::Table;

use super::{fit_row, table_from_text, Parser};

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(BufReader::new(file));

        // Read headers
        let headers: Vec<String> = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(str::to_string)
            .collect();

        // Read rows
        let mut rows = Vec::new();
        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for 1-indexing and header
            let record = result.with_context(|| format!("Failed to read CSV row {}", line))?;
            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            rows.push(fit_row(cells, headers.len(), String::new(), line));
        }

        let table = table_from_text(headers, rows, config)
            .with_context(|| format!("Failed to build table from {}", path.display()))?;
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::{CellValue, DataType};

    fn parse_str(content: &str, config: &Config) -> Table {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        CsvParser.parse(file.path(), config).unwrap()
    }

    #[test]
    fn test_parse_typed_columns() {
        let table = parse_str(
            "id,score,active,name\n1,2.5,TRUE,ann\n2,NA,false,\n",
            &Config::default(),
        );

        assert_eq!(table.headers, vec!["id", "score", "active", "name"]);
        assert_eq!(
            table.column_types,
            vec![DataType::Integer, DataType::Double, DataType::Boolean, DataType::String]
        );
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::Int(1),
                CellValue::Double(2.5),
                CellValue::Bool(true),
                CellValue::from("ann")
            ]
        );
        assert_eq!(
            table.rows[1],
            vec![CellValue::Int(2), CellValue::Null, CellValue::Bool(false), CellValue::Null]
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_str("a,b\n1\n", &Config::default());
        assert_eq!(table.rows[0], vec![CellValue::Int(1), CellValue::Null]);
    }

    #[test]
    fn test_text_with_leading_zeros_kept() {
        let table = parse_str("zip\n01234\nabc\n", &Config::default());
        assert_eq!(table.column_types, vec![DataType::String]);
        assert_eq!(table.rows[0], vec![CellValue::from("01234")]);
    }
}
