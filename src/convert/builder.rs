//! Typed column builders and cell coercion

use indexmap::IndexSet;

use crate::error::{ConvertError, Result};
use crate::model::{CellValue, Column, DataType, Vector};

/// Accumulates one column's values row by row
#[derive(Debug)]
pub(crate) enum ColumnBuilder {
    Integer(Vec<Option<i32>>),
    Double(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    String(Vec<Option<String>>),
    Byte(Vec<Option<u8>>),
}

impl ColumnBuilder {
    /// Create an empty builder for the given type
    pub(crate) fn with_capacity(data_type: DataType, capacity: usize) -> Self {
        match data_type {
            DataType::Integer => ColumnBuilder::Integer(Vec::with_capacity(capacity)),
            DataType::Double => ColumnBuilder::Double(Vec::with_capacity(capacity)),
            DataType::Boolean => ColumnBuilder::Boolean(Vec::with_capacity(capacity)),
            DataType::String => ColumnBuilder::String(Vec::with_capacity(capacity)),
            DataType::Byte => ColumnBuilder::Byte(Vec::with_capacity(capacity)),
        }
    }

    /// Target type of this builder
    pub(crate) fn data_type(&self) -> DataType {
        match self {
            ColumnBuilder::Integer(_) => DataType::Integer,
            ColumnBuilder::Double(_) => DataType::Double,
            ColumnBuilder::Boolean(_) => DataType::Boolean,
            ColumnBuilder::String(_) => DataType::String,
            ColumnBuilder::Byte(_) => DataType::Byte,
        }
    }

    /// Append a cell, NA for null, otherwise coerced to the target type.
    /// On failure nothing is appended and the parse failure is returned.
    pub(crate) fn append(&mut self, value: &CellValue) -> std::result::Result<(), String> {
        if value.is_null() {
            self.append_na();
            return Ok(());
        }
        match self {
            ColumnBuilder::Integer(values) => values.push(Some(as_integer(value)?)),
            ColumnBuilder::Double(values) => values.push(Some(as_double(value)?)),
            ColumnBuilder::Boolean(values) => values.push(Some(as_boolean(value))),
            ColumnBuilder::String(values) => values.push(Some(as_string(value))),
            ColumnBuilder::Byte(values) => values.push(Some(as_byte(value)?)),
        }
        Ok(())
    }

    /// Append the builder's missing marker
    pub(crate) fn append_na(&mut self) {
        match self {
            ColumnBuilder::Integer(values) => values.push(None),
            ColumnBuilder::Double(values) => values.push(None),
            ColumnBuilder::Boolean(values) => values.push(None),
            ColumnBuilder::String(values) => values.push(None),
            ColumnBuilder::Byte(values) => values.push(None),
        }
    }

    /// Finalize into an immutable vector
    pub(crate) fn finish(self) -> Vector {
        match self {
            ColumnBuilder::Integer(values) => Vector::Integer(values),
            ColumnBuilder::Double(values) => Vector::Double(values),
            ColumnBuilder::Boolean(values) => Vector::Logical(values),
            ColumnBuilder::String(values) => Vector::Character(values),
            ColumnBuilder::Byte(values) => Vector::Raw(values),
        }
    }

    /// Finalize a string builder into a factor column
    pub(crate) fn finish_factor(self) -> Result<Column> {
        match self.finish() {
            Vector::Character(values) => factorize(values),
            other => Err(ConvertError::MalformedTable(format!(
                "cannot build a factor from {} storage",
                other.kind()
            ))),
        }
    }
}

/// Encode labels as 1-based codes into their sorted distinct levels
pub(crate) fn factorize(values: Vec<Option<String>>) -> Result<Column> {
    let mut levels: IndexSet<String> = values.iter().flatten().cloned().collect();
    levels.sort();

    let codes = values
        .iter()
        .map(|value| match value {
            None => Ok(None),
            Some(label) => {
                let index = levels.get_index_of(label).unwrap_or_default();
                i32::try_from(index + 1).map(Some).map_err(|_| {
                    ConvertError::MalformedTable(format!("too many factor levels ({})", levels.len()))
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Column::factor(codes, levels))
}

/// Text a non-native value is parsed from. Doubles keep their decimal
/// point, so `5.0` never reads as the integer `5`.
fn parse_text(value: &CellValue) -> String {
    match value {
        CellValue::Double(d) => format!("{:?}", d),
        other => other.to_string(),
    }
}

/// Coerce to a 32-bit integer: integers directly, anything else parsed
pub fn as_integer(value: &CellValue) -> std::result::Result<i32, String> {
    match value {
        CellValue::Int(i) => Ok(*i),
        CellValue::Byte(b) => Ok(i32::from(*b)),
        other => parse_text(other).parse::<i32>().map_err(|e| e.to_string()),
    }
}

/// Coerce to a double: numbers directly, anything else parsed
pub fn as_double(value: &CellValue) -> std::result::Result<f64, String> {
    match value {
        CellValue::Double(d) => Ok(*d),
        CellValue::Int(i) => Ok(f64::from(*i)),
        CellValue::Byte(b) => Ok(f64::from(*b)),
        other => other.to_string().parse::<f64>().map_err(|e| e.to_string()),
    }
}

/// Lenient boolean: only `true` (any case) and `1` map to true
pub fn as_boolean(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        other => {
            let s = parse_text(other);
            s.eq_ignore_ascii_case("true") || s == "1"
        }
    }
}

/// Canonical string form
pub fn as_string(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce to a byte: bytes directly, anything else parsed as a signed
/// 8-bit value (-128..=127) and stored as its bit pattern
pub fn as_byte(value: &CellValue) -> std::result::Result<u8, String> {
    match value {
        CellValue::Byte(b) => Ok(*b),
        other => parse_text(other)
            .parse::<i8>()
            .map(|b| b as u8)
            .map_err(|e| e.to_string()),
    }
}
