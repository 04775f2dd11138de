//! Parquet output format

use std::io::Write;

use anyhow::{Context, Result};
use parquet::arrow::ArrowWriter;

use crate::interop::frame_to_record_batch;
use crate::model::Frame;

use super::OutputFormatter;

/// Parquet output formatter
pub struct ParquetOutput;

impl ParquetOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParquetOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ParquetOutput {
    fn render(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        let batch = frame_to_record_batch(frame)?;

        // The arrow writer needs an owned `Send` sink
        let mut buffer = Vec::new();
        let mut arrow_writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None)
            .context("Failed to create Parquet writer")?;
        arrow_writer.write(&batch).context("Failed to write Parquet batch")?;
        arrow_writer.close().context("Failed to finish Parquet file")?;

        writer.write_all(&buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::config::Config;
    use crate::convert::{build_frame, ConvertOptions};
    use crate::model::{CellValue, DataType, Table};
    use crate::parser::{Parser, ParquetParser};

    #[test]
    fn test_parquet_round_trip() {
        let mut table =
            Table::new(vec!["id".into(), "tag".into()], vec![DataType::Integer, DataType::String])
                .unwrap();
        table.push_row(vec![1.into(), "b".into()]).unwrap();
        table.push_row(vec![CellValue::Null, "a".into()]).unwrap();
        let options = ConvertOptions::new().with_factors(vec!["tag".into()]);
        let frame = build_frame(&table, &options).unwrap();

        let mut file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut buffer = Vec::new();
        ParquetOutput::new().render(&frame, &mut buffer).unwrap();
        file.write_all(&buffer).unwrap();

        let back = ParquetParser.parse(file.path(), &Config::default()).unwrap();
        assert_eq!(back, table);
    }
}
