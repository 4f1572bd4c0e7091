//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Curio CLI - Extract requirement clauses from RFP documents.
#[derive(Debug, Parser)]
#[command(name = "curio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CURIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true, env = "CURIO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (texts or IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract clauses from a local document
    Extract(ExtractArgs),

    /// Download a document and extract its clauses
    Fetch(FetchArgs),

    /// Extract clauses from a document and store them under a new RFP
    Import(ImportArgs),

    /// List stored clauses
    Clauses(ClausesArgs),

    /// List stored RFPs
    Rfps,
}

/// Flags shared by the extracting commands.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct ExtractFlags {
    /// Fail on unsupported file types instead of returning no clauses
    #[arg(long)]
    pub strict: bool,

    /// Record the PDF page each clause was found on
    #[arg(long)]
    pub pages: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Document to read (.pdf, .doc, .docx or .zip)
    pub path: PathBuf,

    #[command(flatten)]
    pub flags: ExtractFlags,
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Document URL
    pub url: String,

    /// File name deciding the format (defaults to the URL's last segment)
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub flags: ExtractFlags,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Document to import
    pub path: PathBuf,

    /// RFP title (defaults to the file name)
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Issuing organization
    #[arg(short, long, default_value = "")]
    pub organization: String,

    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,

    #[command(flatten)]
    pub flags: ExtractFlags,
}

/// Arguments for the clauses command.
#[derive(Debug, Parser)]
pub struct ClausesArgs {
    /// Only clauses of this RFP
    #[arg(long)]
    pub rfp_id: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
