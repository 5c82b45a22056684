pub mod cases_csv;
pub mod interpolation;
pub mod monthly_aggregation;
pub mod monthly_plot;
pub mod output_json;
pub mod pipeline;
pub mod pipeline_config;
pub mod variant_json;
