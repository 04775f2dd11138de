//! Parquet file parser

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use log::warn;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::Config;
use crate::convert::frame_to_table;
use crate::interop::record_batch_to_frame;
use crate::model::Table;

use super::Parser;

/// Parser for Parquet files
pub struct ParquetParser;

impl Parser for ParquetParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .context("Failed to create Parquet reader")?;

        let schema = builder.schema().clone();
        let reader = builder.build().context("Failed to build Parquet reader")?;

        if !config.column_types.is_empty() {
            warn!("declared column types are ignored for Parquet input");
        }

        // An empty batch fixes headers and types even when the file has no rows
        let empty = RecordBatch::new_empty(schema);
        let mut table = frame_to_table(&record_batch_to_frame(&empty)?)?;

        for batch_result in reader {
            let batch = batch_result.context("Failed to read Parquet batch")?;
            let frame = record_batch_to_frame(&batch)?;
            let part = frame_to_table(&frame)?;
            table.rows.extend(part.rows);
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "parquet" | "pq")
    }
}
