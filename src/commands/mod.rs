pub mod base_commands;
pub mod completions_cmd;
pub mod plot_monthly_cmd;
pub mod prepare_cmd;
pub mod report_format;
