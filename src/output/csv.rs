//! CSV output format

use std::io::Write;

use anyhow::Result;

use crate::convert::{extract_headers, extract_rows};
use crate::model::{CellValue, Frame};

use super::OutputFormatter;

/// Text written for missing values
const NA_TEXT: &str = "NA";

/// CSV output formatter; factors are written as their labels
pub struct CsvOutput;

impl CsvOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(extract_headers(frame)?)?;
        for row in extract_rows(frame)? {
            csv_writer.write_record(row.iter().map(|cell| match cell {
                CellValue::Null => NA_TEXT.to_string(),
                other => other.to_string(),
            }))?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Vector};

    #[test]
    fn test_csv_output() {
        let frame = Frame::from_named(vec![
            ("id".into(), Vector::Integer(vec![Some(1), None]).into()),
            (
                "level".into(),
                Column::factor(
                    vec![Some(2), Some(1)],
                    ["high", "low"].into_iter().map(String::from).collect(),
                ),
            ),
        ]);

        let mut buffer = Vec::new();
        CsvOutput::new().render(&frame, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "id,level\n1,low\nNA,high\n");
    }
}
