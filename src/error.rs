//! Conversion errors

use thiserror::Error;

use crate::model::{DataType, VectorKind};

/// Errors raised while converting between tables and frames
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Required frame metadata is missing or inconsistent
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Table rows, headers or types disagree with each other
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// Column storage has no declared type
    #[error("column `{column}` has unsupported storage type {kind}")]
    UnsupportedColumnType { column: String, kind: VectorKind },

    /// A factor code points outside its level set
    #[error(
        "factor column `{column}` row {row}: code {code} is outside the {levels} level(s)"
    )]
    CorruptCategoricalIndex {
        column: String,
        row: usize,
        code: i32,
        levels: usize,
    },

    /// A cell could not be coerced to its column's type
    #[error("cannot convert {value:?} to {target} at row {row}, column `{column}`: {reason}")]
    TypeCoercion {
        row: usize,
        column: String,
        value: String,
        target: DataType,
        reason: String,
    },

    /// An option referenced a column the table does not have
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// Arrow column type with no frame storage equivalent
    #[error("column `{column}` has unsupported arrow type {data_type}")]
    UnsupportedArrowType { column: String, data_type: String },

    /// Frame attributes could not be encoded as schema metadata
    #[error("failed to encode frame metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result alias for conversions
pub type Result<T> = std::result::Result<T, ConvertError>;
