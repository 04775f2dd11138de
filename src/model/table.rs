//! Row-oriented table and its cell values

use serde::{Deserialize, Serialize};

use super::data_type::DataType;
use crate::error::ConvertError;

/// A dynamically typed cell value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    Byte(u8),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Double(a), CellValue::Double(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Byte(a), CellValue::Byte(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Double(b)) => f64::from(*a) == *b,
            (CellValue::Double(a), CellValue::Int(b)) => *a == f64::from(*b),
            (CellValue::Int(a), CellValue::Byte(b)) => *a == i32::from(*b),
            (CellValue::Byte(a), CellValue::Int(b)) => i32::from(*a) == *b,
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The declared type this value naturally belongs to
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(_) => Some(DataType::Boolean),
            CellValue::Int(_) => Some(DataType::Integer),
            CellValue::Double(_) => Some(DataType::Double),
            CellValue::String(_) => Some(DataType::String),
            CellValue::Byte(_) => Some(DataType::Byte),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "NA"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Double(d) => write!(f, "{}", d),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Byte(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Double(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<u8> for CellValue {
    fn from(b: u8) -> Self {
        CellValue::Byte(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A table with named, typed columns and row-major data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in column order
    pub headers: Vec<String>,
    /// Declared type of each column
    pub column_types: Vec<DataType>,
    /// Rows, each holding one value per column
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table
    pub fn new(headers: Vec<String>, column_types: Vec<DataType>) -> Result<Self, ConvertError> {
        if headers.len() != column_types.len() {
            return Err(ConvertError::MalformedTable(format!(
                "{} headers but {} column types",
                headers.len(),
                column_types.len()
            )));
        }
        Ok(Self {
            headers,
            column_types,
            rows: Vec::new(),
        })
    }

    /// Append a row, rejecting it if its width differs from the header count
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), ConvertError> {
        if row.len() != self.column_count() {
            return Err(ConvertError::MalformedTable(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.column_count()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
