use std::process::ExitCode;

use clap::Parser;
use variant_prep::commands::base_commands::{CliArgs, Commands};
use variant_prep::commands::completions_cmd::completions_command;
use variant_prep::commands::plot_monthly_cmd::plot_monthly_command;
use variant_prep::commands::prepare_cmd::prepare_command;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match args.command.unwrap_or_default() {
        Commands::Prepare(args) => prepare_command(args),
        Commands::PlotMonthly(args) => plot_monthly_command(args),
        Commands::Completions { shell } => completions_command(shell),
    }
}
