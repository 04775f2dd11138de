//! Conversion between row-oriented tables and columnar frames

mod builder;
mod extract;

use log::debug;
use rustc_hash::FxHashSet;

use crate::error::{ConvertError, Result};
use crate::model::{DataType, Frame, RowNames, Table};

use self::builder::ColumnBuilder;

pub use builder::{as_boolean, as_byte, as_double, as_integer, as_string};
pub use extract::{extract_column_types, extract_headers, extract_rows};

/// Options for building a frame from a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Build every column as character storage
    pub strings_only: bool,
    /// Columns to build as factors
    pub factors: Vec<String>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every column as character storage
    pub fn with_strings_only(mut self, strings_only: bool) -> Self {
        self.strings_only = strings_only;
        self
    }

    /// Set columns to build as factors
    pub fn with_factors(mut self, columns: Vec<String>) -> Self {
        self.factors = columns;
        self
    }
}

/// Build a data frame from a table
pub fn build_frame(table: &Table, options: &ConvertOptions) -> Result<Frame> {
    validate_table(table)?;

    let factor_flags = factor_flags(table, &options.factors)?;
    let row_count = table.row_count();

    debug!(
        "building frame: {} columns, {} rows, strings_only={}, {} factor(s)",
        table.column_count(),
        row_count,
        options.strings_only,
        options.factors.len()
    );

    let mut builders: Vec<ColumnBuilder> = table
        .column_types
        .iter()
        .zip(&factor_flags)
        .map(|(&data_type, &is_factor)| {
            let target = if options.strings_only || is_factor {
                DataType::String
            } else {
                data_type
            };
            ColumnBuilder::with_capacity(target, row_count)
        })
        .collect();

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, (builder, value)) in builders.iter_mut().zip(row).enumerate() {
            let target = builder.data_type();
            builder
                .append(value)
                .map_err(|reason| ConvertError::TypeCoercion {
                    row: row_idx,
                    column: table.headers[col_idx].clone(),
                    value: value.to_string(),
                    target,
                    reason,
                })?;
        }
    }

    let named = table
        .headers
        .iter()
        .cloned()
        .zip(builders.into_iter().zip(factor_flags))
        .map(|(name, (builder, is_factor))| {
            let column = if is_factor {
                builder.finish_factor()?
            } else {
                builder.finish().into()
            };
            Ok((name, column))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut frame = Frame::from_named(named);
    // Row names follow the table even when it has no columns
    frame.attributes.row_names = Some(RowNames::Automatic(row_count));
    Ok(frame)
}

/// Convert a frame back into a table
pub fn frame_to_table(frame: &Frame) -> Result<Table> {
    let headers = extract_headers(frame)?;
    let column_types = extract_column_types(frame)?;
    let rows = extract_rows(frame)?;

    debug!("extracted table: {} columns, {} rows", headers.len(), rows.len());

    let mut table = Table::new(headers, column_types)?;
    table.rows = rows;
    Ok(table)
}

/// Check header/type counts, header uniqueness and row widths
fn validate_table(table: &Table) -> Result<()> {
    if table.headers.len() != table.column_types.len() {
        return Err(ConvertError::MalformedTable(format!(
            "{} headers but {} column types",
            table.headers.len(),
            table.column_types.len()
        )));
    }

    let mut seen = FxHashSet::default();
    for header in &table.headers {
        if !seen.insert(header.as_str()) {
            return Err(ConvertError::MalformedTable(format!(
                "duplicate column name `{}`",
                header
            )));
        }
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.len() != table.column_count() {
            return Err(ConvertError::MalformedTable(format!(
                "row {} has {} values, expected {}",
                row_idx,
                row.len(),
                table.column_count()
            )));
        }
    }

    Ok(())
}

/// Per-column flag marking the columns requested as factors
fn factor_flags(table: &Table, factors: &[String]) -> Result<Vec<bool>> {
    let mut flags = vec![false; table.column_count()];
    for name in factors {
        let index = table
            .column_index(name)
            .ok_or_else(|| ConvertError::UnknownColumn(name.clone()))?;
        flags[index] = true;
    }
    Ok(flags)
}
