//! Loads both inputs, interpolates daily variant shares, aggregates them by
//! month and writes the combined dataset.
//!
//! Nothing is written unless every stage succeeds.

use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::domain::case_record::DailyCaseRecord;
use crate::domain::timepoint::DistributionTimepoint;
use crate::services::cases_csv::{CasesCsvError, load_case_series};
use crate::services::interpolation::interpolate_daily;
use crate::services::monthly_aggregation::aggregate_monthly;
use crate::services::output_json::{
    DatasetSources, OutputJsonError, VariantDataset, build_dataset, write_dataset_json,
};
use crate::services::pipeline_config::PipelineConfig;
use crate::services::variant_json::{VariantJsonError, load_variant_distribution};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Cases(#[from] CasesCsvError),
    #[error(transparent)]
    Variants(#[from] VariantJsonError),
    #[error(transparent)]
    Output(#[from] OutputJsonError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub output_path: PathBuf,
    pub daily_rows: usize,
    pub monthly_rows: usize,
    pub timepoints_used: usize,
    pub source_found: bool,
}

pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary, PipelineError> {
    let cases = load_case_series(&config.cases_path)?;
    let distribution = load_variant_distribution(&config.variants_path)?;

    let dataset = prepare_dataset(&config.sources(), &cases.records, &distribution.timepoints);
    write_dataset_json(&config.output_path, &dataset)?;
    info!("wrote {}", config.output_path.display());

    Ok(PipelineSummary {
        output_path: config.output_path.clone(),
        daily_rows: dataset.interpolated_daily_variant_values.len(),
        monthly_rows: dataset.monthly_percentage_values.len(),
        timepoints_used: distribution.timepoints.len(),
        source_found: distribution.source_found,
    })
}

/// The in-memory part of the pipeline: interpolate, aggregate, shape output.
pub fn prepare_dataset(
    sources: &DatasetSources,
    records: &[DailyCaseRecord],
    timepoints: &[DistributionTimepoint],
) -> VariantDataset {
    let daily = interpolate_daily(records, timepoints);
    let months = aggregate_monthly(records, &daily);
    info!(
        "interpolated {} days against {} timepoints into {} months",
        daily.len(),
        timepoints.len(),
        months.len()
    );
    build_dataset(sources, records, &daily, &months)
}
