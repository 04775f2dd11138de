//! Declared column types and their frame storage kinds

use serde::{Deserialize, Serialize};

/// Declared type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Double,
    Boolean,
    String,
    Byte,
}

impl DataType {
    /// Storage kind a column of this type is built into
    pub fn vector_kind(self) -> VectorKind {
        match self {
            DataType::Integer => VectorKind::Integer,
            DataType::Double => VectorKind::Double,
            DataType::Boolean => VectorKind::Logical,
            DataType::String => VectorKind::Character,
            DataType::Byte => VectorKind::Raw,
        }
    }

    /// Declared type for a storage kind, if the kind has one
    pub fn from_vector_kind(kind: VectorKind) -> Option<DataType> {
        match kind {
            VectorKind::Integer => Some(DataType::Integer),
            VectorKind::Double => Some(DataType::Double),
            VectorKind::Logical => Some(DataType::Boolean),
            VectorKind::Character => Some(DataType::String),
            VectorKind::Raw => Some(DataType::Byte),
            VectorKind::Complex | VectorKind::List => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "integer"),
            DataType::Double => write!(f, "double"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::String => write!(f, "string"),
            DataType::Byte => write!(f, "byte"),
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integer" | "int" => Ok(DataType::Integer),
            "double" | "numeric" | "float" => Ok(DataType::Double),
            "boolean" | "bool" | "logical" => Ok(DataType::Boolean),
            "string" | "character" | "str" => Ok(DataType::String),
            "byte" | "raw" => Ok(DataType::Byte),
            _ => Err(format!("Unknown data type: {}", s)),
        }
    }
}

/// Storage kind of a frame vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorKind {
    Integer,
    Double,
    Logical,
    Character,
    Raw,
    Complex,
    List,
}

impl std::fmt::Display for VectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorKind::Integer => write!(f, "integer"),
            VectorKind::Double => write!(f, "double"),
            VectorKind::Logical => write!(f, "logical"),
            VectorKind::Character => write!(f, "character"),
            VectorKind::Raw => write!(f, "raw"),
            VectorKind::Complex => write!(f, "complex"),
            VectorKind::List => write!(f, "list"),
        }
    }
}
