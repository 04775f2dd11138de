//! Output formatting for converted frames

mod csv;
mod json;
mod parquet;
mod terminal;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{bail, Context, Result};
use termcolor::ColorChoice;

use crate::config::{Config, OutputFormat};
use crate::model::Frame;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::parquet::ParquetOutput;
pub use self::terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a frame to a writer
    fn render(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, config: &Config) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => {
                let color_choice = if config.output_file.is_some() {
                    ColorChoice::Never
                } else {
                    ColorChoice::Auto
                };
                Box::new(TerminalOutput::new(config.head).with_color_choice(color_choice))
            }
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Csv => Box::new(CsvOutput::new()),
            OutputFormat::Parquet => Box::new(ParquetOutput::new()),
        }
    }
}

/// Render a frame to the configured output file, or stdout
pub fn render(frame: &Frame, config: &Config) -> Result<()> {
    let formatter = OutputFactory::create(config.output_format, config);

    match &config.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            formatter.render(frame, &mut writer)?;
            writer.flush()?;
        }
        None => {
            if config.output_format == OutputFormat::Parquet {
                bail!("Parquet output needs an output file");
            }
            let mut stdout = std::io::stdout().lock();
            formatter.render(frame, &mut stdout)?;
        }
    }

    Ok(())
}
