//! CLI argument definitions for the EG tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use eg_format::{DEFAULT_DELIMITER, NumberFormat};

#[derive(Parser)]
#[command(
    name = "egtool",
    version,
    about = "Inspect and convert EG measurement files",
    long_about = "Inspect and convert EG measurement files.\n\n\
                  Decodes the flat EG text table into labeled coordinates and\n\
                  N-dimensional variables, and writes them back out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the dimensions, variables and attributes of a file.
    Inspect(InspectArgs),

    /// Decode a file and write it back with new formatting or identifiers.
    Convert(ConvertArgs),

    /// Write the decoded dataset as JSON.
    Export(ExportArgs),
}

/// Header corrections applied while reading.
#[derive(Args)]
pub struct PresetArgs {
    /// Diagnostic name used to select known header corrections.
    #[arg(long = "diag", value_name = "NAME", requires = "shot")]
    pub diag: Option<String>,

    /// Shot number the file belongs to.
    #[arg(long = "shot", value_name = "N", requires = "diag")]
    pub shot: Option<i64>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// EG file to read.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub preset: PresetArgs,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// EG file to read.
    #[arg(value_name = "IN")]
    pub input: PathBuf,

    /// EG file to write.
    #[arg(value_name = "OUT")]
    pub output: PathBuf,

    /// Diagnostic name written to NAME (default: the input's).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Shot number written to ShotNo (default: the input's).
    #[arg(long = "shot", value_name = "N")]
    pub shot: Option<i64>,

    /// printf-style format of table values.
    #[arg(long = "fmt", value_name = "SPEC", default_value = "%.6e")]
    pub fmt: NumberFormat,

    /// Field delimiter of table rows.
    #[arg(long = "delimiter", value_name = "D", default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// EG file to read.
    #[arg(value_name = "IN")]
    pub input: PathBuf,

    /// JSON file to write (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub preset: PresetArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
