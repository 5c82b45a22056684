use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Weekday};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::timepoint::{DistributionTimepoint, VariantFractions};
use crate::domain::variant::Category;

/// Only the first distribution for this country code is used.
pub const TARGET_COUNTRY: &str = "USA";

#[derive(Error, Debug)]
pub enum VariantJsonError {
    #[error("failed to read variant distribution file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse variant distribution json {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Sorted timepoints taken from the selected distribution.
#[derive(Debug, Clone, Default)]
pub struct VariantDistribution {
    pub timepoints: Vec<DistributionTimepoint>,
    /// Whether a qualifying distribution for [`TARGET_COUNTRY`] was found.
    pub source_found: bool,
    pub skipped_timepoints: usize,
}

// Every field below is optional. Absent or wrongly typed values fall back to
// an empty list / empty map / `None`, which the extraction treats as "no data".

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PerCountryDocument {
    #[serde(deserialize_with = "lenient_seq")]
    regions: Vec<RegionRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegionRecord {
    #[serde(deserialize_with = "lenient_seq")]
    distributions: Vec<DistributionRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DistributionRecord {
    country: Option<Value>,
    #[serde(deserialize_with = "lenient_seq")]
    distribution: Vec<TimepointRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimepointRecord {
    week: Option<Value>,
    total_sequences: Option<Value>,
    #[serde(deserialize_with = "lenient_map")]
    cluster_counts: Map<String, Value>,
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Numbers and numeric strings are accepted; anything else reads as 0.
fn lenient_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Loads the per-country distribution file and extracts the timepoints of
/// the first usable [`TARGET_COUNTRY`] entry.
///
/// # Errors
/// - Returns an error when the file cannot be read or is not JSON.
pub fn load_variant_distribution<P: AsRef<Path>>(
    path: P,
) -> Result<VariantDistribution, VariantJsonError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| VariantJsonError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_variant_distribution(&contents, path)
}

pub fn parse_variant_distribution(
    contents: &str,
    path: &Path,
) -> Result<VariantDistribution, VariantJsonError> {
    let root: Value = serde_json::from_str(contents).map_err(|source| VariantJsonError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let distribution = extract_distribution(root);
    if distribution.source_found {
        info!(
            "using {} {TARGET_COUNTRY} timepoints from {} ({} skipped)",
            distribution.timepoints.len(),
            path.display(),
            distribution.skipped_timepoints
        );
    } else {
        warn!(
            "no {TARGET_COUNTRY} distribution in {}; every date will be unknown",
            path.display()
        );
    }
    Ok(distribution)
}

/// Selects the first region entry for [`TARGET_COUNTRY`] with a non-empty
/// `distribution` list and converts its timepoints. Later entries for the same
/// country are not consulted.
pub fn extract_distribution(root: Value) -> VariantDistribution {
    let document: PerCountryDocument = if root.is_object() {
        serde_json::from_value(root).unwrap_or_default()
    } else {
        PerCountryDocument::default()
    };

    let selected = document
        .regions
        .into_iter()
        .flat_map(|region| region.distributions)
        .find(|entry| {
            entry.country.as_ref().and_then(Value::as_str) == Some(TARGET_COUNTRY)
                && !entry.distribution.is_empty()
        });

    let Some(entry) = selected else {
        return VariantDistribution::default();
    };

    let total = entry.distribution.len();
    let mut timepoints: Vec<DistributionTimepoint> = entry
        .distribution
        .iter()
        .filter_map(convert_timepoint)
        .collect();
    timepoints.sort_by_key(|timepoint| timepoint.date);

    VariantDistribution {
        skipped_timepoints: total - timepoints.len(),
        timepoints,
        source_found: true,
    }
}

fn convert_timepoint(record: &TimepointRecord) -> Option<DistributionTimepoint> {
    let week = record
        .week
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|week| !week.is_empty());
    let total_sequences = lenient_number(record.total_sequences.as_ref());
    let Some(week) = week.filter(|_| total_sequences > 0.0) else {
        debug!("skipping timepoint without week label or sequences");
        return None;
    };
    let Some(date) = parse_week_label(week) else {
        warn!("skipping timepoint with unparseable week label '{week}'");
        return None;
    };

    let mut counts: BTreeMap<Category, f64> = BTreeMap::new();
    for (label, raw_count) in &record.cluster_counts {
        let count = lenient_number(Some(raw_count));
        if count <= 0.0 {
            continue;
        }
        *counts.entry(Category::from_cluster_label(label)).or_insert(0.0) += count;
    }

    let accounted: f64 = counts.values().sum();
    if accounted < total_sequences {
        *counts.entry(Category::Unknown).or_insert(0.0) += total_sequences - accounted;
    }

    let fractions: VariantFractions = counts
        .into_iter()
        .filter(|(_, count)| *count > 0.0)
        .map(|(category, count)| (category, count / total_sequences))
        .collect();

    if fractions.is_empty() {
        return None;
    }
    Some(DistributionTimepoint::new(date, fractions))
}

/// Accepts `YYYY-MM-DD` and ISO week labels (`YYYY-Www`, `YYYY-Www-D`).
/// A week without a weekday maps to its Monday.
pub fn parse_week_label(label: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Some(date);
    }

    let (year, rest) = label.split_once("-W")?;
    let (week, weekday) = match rest.split_once('-') {
        Some((week, day)) => (week, iso_weekday(day.parse().ok()?)?),
        None => (rest, Weekday::Mon),
    };
    NaiveDate::from_isoywd_opt(year.parse().ok()?, week.parse().ok()?, weekday)
}

fn iso_weekday(day: u32) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
