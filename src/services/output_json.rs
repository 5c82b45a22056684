use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::case_record::DailyCaseRecord;
use crate::domain::monthly::MonthlyBucket;
use crate::domain::timepoint::VariantFractions;
use crate::domain::variant::{Category, WHO_VARIANTS};

pub const CASE_DECIMALS: i32 = 6;
pub const FRACTION_DECIMALS: i32 = 10;

pub const SOURCE_POLICY: &str = "first USA only";

pub const POLICY_NOTES: [&str; 4] = [
    "Daily variant fractions are linearly interpolated between USA timepoints.",
    "Dates before first USA timepoint are set to unknown=1.",
    "Dates after last USA timepoint use the last USA timepoint percentages.",
    "Unknown receives remainder if interpolated fractions sum to < 0.999.",
];

#[derive(Error, Debug)]
pub enum OutputJsonError {
    #[error("failed to serialize variant dataset: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write variant dataset {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to read variant dataset {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse variant dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    pub source_cases_csv: String,
    pub source_variants_json: String,
    pub usa_distribution_used: String,
    pub who_variants: Vec<Category>,
    pub notes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyVariantValue {
    pub date: String,
    pub new_confirmed: f64,
    pub variant_fractions: BTreeMap<Category, f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyPercentageValue {
    pub month: String,
    pub monthly_new_cases: f64,
    pub variant_case_counts: BTreeMap<Category, f64>,
    pub variant_percentages: BTreeMap<Category, f64>,
}

/// The document written by `prepare`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VariantDataset {
    pub metadata: DatasetMetadata,
    pub interpolated_daily_variant_values: Vec<DailyVariantValue>,
    pub monthly_percentage_values: Vec<MonthlyPercentageValue>,
}

/// Names of the input files, as recorded in the metadata.
#[derive(Debug, Clone)]
pub struct DatasetSources {
    pub cases_csv: String,
    pub variants_json: String,
}

impl DatasetMetadata {
    pub fn new(sources: &DatasetSources) -> Self {
        Self {
            source_cases_csv: sources.cases_csv.clone(),
            source_variants_json: sources.variants_json.clone(),
            usa_distribution_used: SOURCE_POLICY.to_string(),
            who_variants: WHO_VARIANTS.to_vec(),
            notes: POLICY_NOTES.iter().map(|note| note.to_string()).collect(),
        }
    }
}

pub fn build_dataset(
    sources: &DatasetSources,
    records: &[DailyCaseRecord],
    daily: &[VariantFractions],
    months: &[MonthlyBucket],
) -> VariantDataset {
    let interpolated_daily_variant_values = records
        .iter()
        .zip(daily)
        .map(|(record, fractions)| DailyVariantValue {
            date: record.date.format("%Y-%m-%d").to_string(),
            new_confirmed: round_to(record.new_confirmed, CASE_DECIMALS),
            variant_fractions: rounded_positive(fractions, FRACTION_DECIMALS),
        })
        .collect();

    let monthly_percentage_values = months
        .iter()
        .map(|bucket| MonthlyPercentageValue {
            month: bucket.month.clone(),
            monthly_new_cases: round_to(bucket.total_new_cases, CASE_DECIMALS),
            variant_case_counts: rounded_positive(&bucket.case_counts, CASE_DECIMALS),
            variant_percentages: rounded_positive(&bucket.percentages, FRACTION_DECIMALS),
        })
        .collect();

    VariantDataset {
        metadata: DatasetMetadata::new(sources),
        interpolated_daily_variant_values,
        monthly_percentage_values,
    }
}

/// Rounds to `decimals` places using the exact binary value; exact ties go
/// to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let places = decimals.max(0) as usize;
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Drops non-positive entries, then rounds the rest.
fn rounded_positive(values: &BTreeMap<Category, f64>, decimals: i32) -> BTreeMap<Category, f64> {
    values
        .iter()
        .filter(|(_, value)| **value > 0.0)
        .map(|(category, value)| (*category, round_to(*value, decimals)))
        .collect()
}

/// Serializes the whole dataset before touching the filesystem, then writes it
/// next to `path` and renames it into place.
pub fn write_dataset_json(path: &Path, dataset: &VariantDataset) -> Result<(), OutputJsonError> {
    let buffer = serde_json::to_vec_pretty(dataset)?;
    let staging = staging_path(path);
    let write_error = |source: io::Error| OutputJsonError::Write {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(&staging, buffer).map_err(write_error)?;
    if let Err(source) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(write_error(source));
    }
    Ok(())
}

pub fn read_dataset_json(path: &Path) -> Result<VariantDataset, OutputJsonError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OutputJsonError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| OutputJsonError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.json".to_string());
    path.with_file_name(format!(".{name}.partial"))
}
