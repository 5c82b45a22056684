use std::process::ExitCode;

use crate::commands::base_commands::PlotMonthlyArgs;
use crate::services::monthly_plot::plot_monthly_from_dataset_file;

pub fn plot_monthly_command(args: PlotMonthlyArgs) -> ExitCode {
    match plot_monthly_from_dataset_file(&args.input, &args.output) {
        Ok(()) => {
            println!("Monthly plot written to {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to plot monthly variant shares: {e}");
            ExitCode::FAILURE
        }
    }
}
