use std::process::ExitCode;

use crate::commands::base_commands::PrepareArgs;
use crate::commands::report_format::format_pipeline_summary;
use crate::services::pipeline::run_pipeline;
use crate::services::pipeline_config::PipelineSettings;

pub fn prepare_command(args: PrepareArgs) -> ExitCode {
    let from_file = match &args.config {
        Some(path) => match PipelineSettings::from_yaml_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => PipelineSettings::default(),
    };
    let config = args.settings().or(from_file).into_config();

    match run_pipeline(&config) {
        Ok(summary) => {
            println!("{}", format_pipeline_summary(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to prepare variant dataset: {e}");
            ExitCode::FAILURE
        }
    }
}
