//! Configuration handling for tableframe

use std::path::PathBuf;

use crate::convert::ConvertOptions;
use crate::model::DataType;

/// Output format for a converted frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
    Parquet,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Tokens read as missing values when none are configured
pub const DEFAULT_NA_STRINGS: &[&str] = &["", "NA"];

/// Configuration for reading, converting and writing a table
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input file
    pub input_file: PathBuf,
    /// Where to write the output; stdout when unset
    pub output_file: Option<PathBuf>,
    /// Output format
    pub output_format: OutputFormat,
    /// Build every column as character storage
    pub strings_only: bool,
    /// Columns to build as factors
    pub factor_columns: Vec<String>,
    /// Declared types that override inference, by column name
    pub column_types: Vec<(String, DataType)>,
    /// For Excel files: which sheet to read
    pub sheet_name: Option<String>,
    /// Text cells read as missing values
    pub na_strings: Vec<String>,
    /// Rows shown in the terminal preview
    pub head: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: None,
            output_format: OutputFormat::default(),
            strings_only: false,
            factor_columns: Vec::new(),
            column_types: Vec::new(),
            sheet_name: None,
            na_strings: DEFAULT_NA_STRINGS.iter().map(|s| s.to_string()).collect(),
            head: 10,
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input_file: PathBuf) -> Self {
        Self {
            input_file,
            ..Default::default()
        }
    }

    /// Set the output file
    pub fn with_output_file(mut self, path: PathBuf) -> Self {
        self.output_file = Some(path);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Build every column as character storage
    pub fn with_strings_only(mut self, strings_only: bool) -> Self {
        self.strings_only = strings_only;
        self
    }

    /// Set columns to build as factors
    pub fn with_factor_columns(mut self, columns: Vec<String>) -> Self {
        self.factor_columns = columns;
        self
    }

    /// Declare a column's type instead of inferring it
    pub fn with_column_type(mut self, column: impl Into<String>, data_type: DataType) -> Self {
        self.column_types.push((column.into(), data_type));
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Set the text cells read as missing values
    pub fn with_na_strings(mut self, na_strings: Vec<String>) -> Self {
        self.na_strings = na_strings;
        self
    }

    /// Set the number of preview rows
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }

    /// Declared type override for a column, if any
    pub fn declared_type(&self, column: &str) -> Option<DataType> {
        self.column_types
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, data_type)| *data_type)
    }

    /// Whether a text cell counts as missing
    pub fn is_na(&self, text: &str) -> bool {
        self.na_strings.iter().any(|na| na == text)
    }

    /// Frame-building options
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_strings_only(self.strings_only)
            .with_factors(self.factor_columns.clone())
    }
}
