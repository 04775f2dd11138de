//! tableframe - Convert tabular files through a typed data frame

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use tableframe::config::{Config, OutputFormat, DEFAULT_NA_STRINGS};
use tableframe::convert::build_frame;
use tableframe::model::DataType;
use tableframe::output::render;
use tableframe::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Csv,
    Parquet,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Parquet => OutputFormat::Parquet,
        }
    }
}

/// Convert a tabular file (CSV, Excel, Parquet, JSON) into a typed data frame
#[derive(Parser, Debug)]
#[command(name = "tableframe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to read
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build every column as character storage
    #[arg(long)]
    strings_only: bool,

    /// Column(s) to build as factors (comma-separated)
    #[arg(long, value_delimiter = ',')]
    factor: Vec<String>,

    /// Declared column type, as COLUMN=TYPE (repeatable)
    #[arg(long = "type", value_parser = parse_column_type)]
    column_type: Vec<(String, DataType)>,

    /// For Excel files: which sheet to read
    #[arg(long)]
    sheet: Option<String>,

    /// Text read as a missing value (comma-separated)
    #[arg(long, value_delimiter = ',')]
    na: Option<Vec<String>>,

    /// Rows shown in the terminal preview
    #[arg(long, default_value_t = 10)]
    head: usize,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_column_type(s: &str) -> Result<(String, DataType), String> {
    let (column, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TYPE, got `{}`", s))?;
    Ok((column.to_string(), kind.parse()?))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    let _ = builder.try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        input_file: cli.input.clone(),
        output_file: cli.output,
        output_format: cli.format.into(),
        strings_only: cli.strings_only,
        factor_columns: cli.factor,
        column_types: cli.column_type,
        sheet_name: cli.sheet,
        na_strings: cli
            .na
            .unwrap_or_else(|| DEFAULT_NA_STRINGS.iter().map(|s| s.to_string()).collect()),
        head: cli.head,
    };

    let factory = ParserFactory::new();
    let table = factory
        .parse(&config.input_file, &config)
        .with_context(|| format!("Failed to parse file: {}", config.input_file.display()))?;
    info!(
        "read {}: {} columns, {} rows",
        config.input_file.display(),
        table.column_count(),
        table.row_count()
    );

    let frame = build_frame(&table, &config.convert_options())
        .with_context(|| format!("Failed to convert {}", config.input_file.display()))?;

    render(&frame, &config)?;

    if let Some(path) = &config.output_file {
        info!("wrote {}", path.display());
    }

    Ok(())
}
