use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::schema::RegionPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about = "Screen delimited transaction files before analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a transaction file and print the error/warning report
    Validate(ValidateArgs),
    /// Report the inferred delimiter and header layout of a file
    Inspect(InspectArgs),
    /// Write the default transaction schema as an editable JSON template
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input transaction file (.csv, .xlsx, .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Column schema JSON produced by the `schema` command
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Severity of the region reference-list check
    #[arg(long = "region-policy", value_enum)]
    pub region_policy: Option<RegionPolicyArg>,
    /// Treat repeated invoice numbers as errors instead of line items
    #[arg(long = "reject-duplicates")]
    pub reject_duplicates: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input transaction file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Destination schema JSON path
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionPolicyArg {
    Off,
    Warn,
    Reject,
}

impl From<RegionPolicyArg> for RegionPolicy {
    fn from(arg: RegionPolicyArg) -> Self {
        match arg {
            RegionPolicyArg::Off => RegionPolicy::Off,
            RegionPolicyArg::Warn => RegionPolicy::Warn,
            RegionPolicyArg::Reject => RegionPolicy::Reject,
        }
    }
}
