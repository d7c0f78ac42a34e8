//! CLI argument definitions.

use std::path::PathBuf;

use adif_adi::Encoding;
use adif_model::FieldContext;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "adif",
    version,
    about = "Convert and check ADIF amateur radio logbooks",
    long_about = "Convert and check ADIF amateur radio logbooks.\n\n\
                  Reads and writes ADI, ADX, JSON and semicolon separated CSV.\n\
                  Field names are validated against ADIF 3.1.4."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
    /// Convert a logbook between ADI, ADX, JSON and CSV.
    ///
    /// The formats are chosen by file extension.
    Convert(ConvertArgs),

    /// Validate a logbook and report problems.
    Check(CheckArgs),

    /// List the standard ADIF fields.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Reject fields that are not defined by ADIF 3.1.4.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Write all fields of a record on one line.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Character encoding of ADI input.
    #[arg(long = "encoding", value_enum, default_value = "utf-8")]
    pub encoding: EncodingArg,

    /// Number of records to skip when reading ADI.
    #[arg(long = "skip", value_name = "N", default_value_t = 0)]
    pub skip: usize,

    /// Write ADX output even if it contains non-standard fields.
    #[arg(long = "lax")]
    pub lax: bool,

    /// Replace non-ASCII characters (fields ending in _INTL are kept).
    #[arg(long = "replace-non-ascii")]
    pub replace_non_ascii: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Character encoding of ADI input.
    #[arg(long = "encoding", value_enum, default_value = "utf-8")]
    pub encoding: EncodingArg,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Only list fields of this section.
    #[arg(long = "context", value_enum)]
    pub context: Option<ContextArg>,

    /// Only list fields whose name contains this text.
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,
}

/// CLI character encoding choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Ascii,
    #[value(name = "utf-8", alias = "utf8")]
    Utf8,
    #[value(name = "latin-1", alias = "latin1")]
    Latin1,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Ascii => Encoding::Ascii,
            EncodingArg::Utf8 => Encoding::Utf8,
            EncodingArg::Latin1 => Encoding::Latin1,
        }
    }
}

/// CLI field section choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ContextArg {
    Header,
    Record,
}

impl From<ContextArg> for FieldContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Header => FieldContext::Header,
            ContextArg::Record => FieldContext::Record,
        }
    }
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
