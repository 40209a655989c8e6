use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(about = "Meeting recording and summarization service", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print version information
    Version,
    /// Export a meeting record to a document
    Export(ExportCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ExportCliArgs {
    /// Path to a meeting JSON file (as returned by GET /meetings/:id)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Target format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,
    /// Output file (defaults to the artifact name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
