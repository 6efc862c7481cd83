pub mod parse;
pub mod parsers;
pub mod scan;
pub mod schema;

use crate::source::Encoding;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "issuescan")]
#[command(
    author,
    version,
    about = "Turn compiler and static analysis output into normalized issue reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse the report files of all configured tools and write reports
    Scan(ScanArgs),

    /// Parse files (or stdin) with a single parser and print the issues
    Parse(ParseArgs),

    /// List available parsers
    Parsers(ParsersArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct ScanArgs {
    /// Path to config file
    #[arg(short, long, default_value = "issuescan.yaml")]
    pub config: PathBuf,

    /// Override max parallel tools
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Run specific tools only (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// Run specific scopes only (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub scopes: Option<Vec<String>>,

    /// Show plan without parsing
    #[arg(long)]
    pub dry_run: bool,

    /// Exit 1 if any ERROR severity issues were found (CI mode)
    #[arg(long)]
    pub fail_on_errors: bool,
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// Parser id (see `issuescan parsers`)
    #[arg(short, long)]
    pub parser: String,

    /// Files to parse; reads stdin if none given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Character encoding of the input
    #[arg(long, default_value_t = Encoding::Utf8)]
    pub encoding: Encoding,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Clone)]
pub struct ParsersArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
