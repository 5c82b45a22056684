use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::pipeline_config::PipelineSettings;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    // `prepare` with default paths when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the daily and monthly variant dataset from case and sequencing data
    Prepare(PrepareArgs),
    /// Plot monthly variant shares from a prepared dataset into a PNG chart
    PlotMonthly(PlotMonthlyArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Prepare(PrepareArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub struct PrepareArgs {
    /// Optional YAML config file with workspace and path settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Base directory for relative paths
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,
    /// Daily cases CSV
    #[arg(long)]
    pub cases: Option<PathBuf>,
    /// Per-country variant distribution JSON
    #[arg(long)]
    pub variants: Option<PathBuf>,
    /// Output JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl PrepareArgs {
    /// Settings given on the command line; unset flags stay `None`.
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            workspace: self.workspace.clone(),
            cases_path: self.cases.clone(),
            variants_path: self.variants.clone(),
            output_path: self.output.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct PlotMonthlyArgs {
    /// Dataset JSON written by `prepare`
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output PNG file
    #[arg(short, long)]
    pub output: PathBuf,
}
