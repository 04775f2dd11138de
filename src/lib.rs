//! tableframe - Convert between row-oriented tables and typed data frames
//!
//! A [`Table`] holds ordered headers, declared column types and
//! dynamically typed rows. A [`Frame`] is the columnar data-frame of a
//! statistical engine: named typed vectors with NA markers, factor
//! columns with ordered levels, and `row.names` / `class` attributes.
//! The [`convert`] module moves data between the two.

pub mod config;
pub mod convert;
pub mod error;
pub mod interop;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use convert::{
    build_frame, extract_column_types, extract_headers, extract_rows, frame_to_table,
    ConvertOptions,
};
pub use error::ConvertError;
pub use model::{CellValue, DataType, Frame, Table};
