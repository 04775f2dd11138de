//! Columnar data frame in the host engine's conventions
//!
//! A frame is a list of typed vectors plus three attributes: `names`
//! (one per column), `row.names` and `class`. A column carrying a
//! `levels` set is a factor: its integer vector stores 1-based codes
//! into those levels. Every vector marks missing elements with `None`.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::data_type::VectorKind;

/// Class tag of a tabular dataset
pub const DATA_FRAME_CLASS: &str = "data.frame";

/// Class tag of a categorical column
pub const FACTOR_CLASS: &str = "factor";

/// A complex number element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// Typed storage of one column, `None` marks NA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum Vector {
    Integer(Vec<Option<i32>>),
    Double(Vec<Option<f64>>),
    Logical(Vec<Option<bool>>),
    Character(Vec<Option<String>>),
    Raw(Vec<Option<u8>>),
    Complex(Vec<Option<Complex>>),
    List(Vec<Vector>),
}

impl Vector {
    /// Storage kind of this vector
    pub fn kind(&self) -> VectorKind {
        match self {
            Vector::Integer(_) => VectorKind::Integer,
            Vector::Double(_) => VectorKind::Double,
            Vector::Logical(_) => VectorKind::Logical,
            Vector::Character(_) => VectorKind::Character,
            Vector::Raw(_) => VectorKind::Raw,
            Vector::Complex(_) => VectorKind::Complex,
            Vector::List(_) => VectorKind::List,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Vector::Integer(v) => v.len(),
            Vector::Double(v) => v.len(),
            Vector::Logical(v) => v.len(),
            Vector::Character(v) => v.len(),
            Vector::Raw(v) => v.len(),
            Vector::Complex(v) => v.len(),
            Vector::List(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether element `index` is NA; out-of-range indices are not NA
    pub fn is_na(&self, index: usize) -> bool {
        match self {
            Vector::Integer(v) => matches!(v.get(index), Some(None)),
            Vector::Double(v) => matches!(v.get(index), Some(None)),
            Vector::Logical(v) => matches!(v.get(index), Some(None)),
            Vector::Character(v) => matches!(v.get(index), Some(None)),
            Vector::Raw(v) => matches!(v.get(index), Some(None)),
            Vector::Complex(v) => matches!(v.get(index), Some(None)),
            Vector::List(_) => false,
        }
    }

    /// Count of NA elements
    pub fn na_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_na(i)).count()
    }
}

/// One frame column: a vector and, for factors, its ordered levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub vector: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<IndexSet<String>>,
}

impl Column {
    /// A plain (non-factor) column
    pub fn new(vector: Vector) -> Self {
        Self {
            vector,
            levels: None,
        }
    }

    /// A factor column from 1-based codes and its levels
    pub fn factor(codes: Vec<Option<i32>>, levels: IndexSet<String>) -> Self {
        Self {
            vector: Vector::Integer(codes),
            levels: Some(levels),
        }
    }

    pub fn is_factor(&self) -> bool {
        self.levels.is_some()
    }

    /// Class attribute of the column as the engine reports it
    pub fn class(&self) -> &'static str {
        if self.is_factor() {
            return FACTOR_CLASS;
        }
        match self.vector.kind() {
            VectorKind::Integer => "integer",
            VectorKind::Double => "numeric",
            VectorKind::Logical => "logical",
            VectorKind::Character => "character",
            VectorKind::Raw => "raw",
            VectorKind::Complex => "complex",
            VectorKind::List => "list",
        }
    }

    pub fn len(&self) -> usize {
        self.vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}

impl From<Vector> for Column {
    fn from(vector: Vector) -> Self {
        Column::new(vector)
    }
}

/// The `row.names` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RowNames {
    /// Synthetic sequential index `0..n`
    Automatic(usize),
    /// Explicit row labels
    Labels(Vec<String>),
}

impl RowNames {
    pub fn len(&self) -> usize {
        match self {
            RowNames::Automatic(n) => *n,
            RowNames::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of row `index`
    pub fn label(&self, index: usize) -> Option<String> {
        match self {
            RowNames::Automatic(n) => (index < *n).then(|| index.to_string()),
            RowNames::Labels(labels) => labels.get(index).cloned(),
        }
    }
}

/// Frame-level attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameAttributes {
    /// Column names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    /// Row names; also fixes the row count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_names: Option<RowNames>,
    /// Class tags, `data.frame` for a tabular dataset
    #[serde(default)]
    pub class: Vec<String>,
}

/// A columnar data frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub columns: Vec<Column>,
    pub attributes: FrameAttributes,
}

impl Frame {
    /// Create a frame from raw parts without validating them
    pub fn new(columns: Vec<Column>, attributes: FrameAttributes) -> Self {
        Self {
            columns,
            attributes,
        }
    }

    /// Create a data frame from named columns, with automatic row names
    pub fn from_named(named: Vec<(String, Column)>) -> Self {
        let row_count = named.first().map_or(0, |(_, c)| c.len());
        let (names, columns): (Vec<_>, Vec<_>) = named.into_iter().unzip();
        Self {
            columns,
            attributes: FrameAttributes {
                names: Some(names),
                row_names: Some(RowNames::Automatic(row_count)),
                class: vec![DATA_FRAME_CLASS.to_string()],
            },
        }
    }

    /// Column names, if the frame has them
    pub fn names(&self) -> Option<&[String]> {
        self.attributes.names.as_deref()
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        let index = self.names()?.iter().position(|n| n == name)?;
        self.columns.get(index)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, from `row.names` or else the first column
    pub fn row_count(&self) -> usize {
        match &self.attributes.row_names {
            Some(row_names) => row_names.len(),
            None => self.columns.first().map_or(0, Column::len),
        }
    }

    /// Whether the frame is tagged as a tabular dataset
    pub fn is_data_frame(&self) -> bool {
        self.attributes.class.iter().any(|c| c == DATA_FRAME_CLASS)
    }
}
