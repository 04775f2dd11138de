//! Data model for tables and frames

mod data_type;
mod frame;
mod table;

pub use data_type::{DataType, VectorKind};
pub use frame::{
    Column, Complex, Frame, FrameAttributes, RowNames, Vector, DATA_FRAME_CLASS, FACTOR_CLASS,
};
pub use table::{CellValue, Table};
