//! JSON array parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;

use crate::config::Config;
use crate::model::{CellValue, Table};

use super::{table_from_values, Parser};

/// Parser for JSON array files
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        // Handle both arrays and single objects
        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        // Collect all unique keys across all objects to build column list
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            match item {
                Value::Object(obj) => column_names.extend(obj.keys().cloned()),
                _ => bail!("JSON array items must be objects"),
            }
        }

        // Keys absent from an object read as missing
        let rows: Vec<Vec<CellValue>> = array
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| {
                column_names
                    .iter()
                    .map(|key| json_value_to_cell(obj.get(key)))
                    .collect()
            })
            .collect();

        table_from_values(column_names.into_iter().collect(), rows, config)
            .with_context(|| format!("Failed to build table from {}", path.display()))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
            Some(i) => CellValue::Int(i),
            None => n
                .as_f64()
                .map(CellValue::Double)
                .unwrap_or_else(|| CellValue::String(n.to_string())),
        },
        Some(Value::String(s)) => CellValue::String(s.clone()),
        // Nested values are kept as their JSON text
        Some(nested @ (Value::Array(_) | Value::Object(_))) => {
            CellValue::String(nested.to_string())
        }
    }
}
