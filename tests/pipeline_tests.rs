mod common;

use std::path::PathBuf;

use assert_fs::prelude::*;
use chrono::NaiveDate;
use predicates::prelude::*;

use variant_prep::domain::variant::Category;
use variant_prep::services::cases_csv::{CasesCsvError, load_case_series};
use variant_prep::services::output_json::read_dataset_json;
use variant_prep::services::pipeline::{PipelineError, run_pipeline};
use variant_prep::services::pipeline_config::PipelineSettings;
use variant_prep::services::variant_json::load_variant_distribution;

use common::{CASES_CSV, VARIANTS_JSON, write_inputs};

fn settings_for(dir: &assert_fs::TempDir) -> PipelineSettings {
    PipelineSettings {
        workspace: Some(dir.path().to_path_buf()),
        output_path: Some(PathBuf::from("dataset.json")),
        ..PipelineSettings::default()
    }
}

#[test]
fn trailing_row_is_excluded_before_date_filtering() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_inputs(&temp, CASES_CSV, VARIANTS_JSON);

    let series = load_case_series(temp.child("COVID_US_cases.csv").path()).unwrap();
    assert_eq!(series.rows_read, 10);
    assert_eq!(series.candidate_rows, 9);
    assert_eq!(series.skipped_blank_dates, 1);
    assert_eq!(series.records.len(), 8);
    assert!(series.records.windows(2).all(|pair| pair[0].date <= pair[1].date));
    assert!(series.records.iter().all(|record| record.new_confirmed >= 0.0));
}

#[test]
fn loads_only_the_first_usa_distribution() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_inputs(&temp, CASES_CSV, VARIANTS_JSON);

    let distribution = load_variant_distribution(temp.child("perCountryData.json").path()).unwrap();
    assert!(distribution.source_found);
    assert_eq!(distribution.skipped_timepoints, 1);

    let dates: Vec<NaiveDate> = distribution.timepoints.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 11).unwrap()
        ]
    );
    let first = &distribution.timepoints[0].fractions;
    assert_eq!(first.get(&Category::Delta), Some(&0.5));
    assert_eq!(first.get(&Category::Alpha), Some(&0.5));
    assert!(!first.contains_key(&Category::Gamma));
}

#[test]
fn run_pipeline_writes_dataset_and_reports_counts() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_inputs(&temp, CASES_CSV, VARIANTS_JSON);

    let config = settings_for(&temp).into_config();
    let summary = run_pipeline(&config).unwrap();

    assert_eq!(summary.output_path, temp.path().join("dataset.json"));
    assert_eq!(summary.daily_rows, 8);
    assert_eq!(summary.monthly_rows, 3);
    assert_eq!(summary.timepoints_used, 2);
    assert!(summary.source_found);

    let dataset = read_dataset_json(&summary.output_path).unwrap();
    let dates: Vec<&str> = dataset
        .interpolated_daily_variant_values
        .iter()
        .map(|day| day.date.as_str())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let midpoint = dataset
        .interpolated_daily_variant_values
        .iter()
        .find(|day| day.date == "2021-01-06")
        .unwrap();
    assert_eq!(midpoint.variant_fractions.get(&Category::Delta), Some(&0.75));
    assert_eq!(midpoint.variant_fractions.get(&Category::Alpha), Some(&0.25));
}

#[test]
fn run_pipeline_fails_on_empty_case_data_without_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_inputs(&temp, "date,new_confirmed\n,4\n2021-01-01,3\n", VARIANTS_JSON);

    let config = settings_for(&temp).into_config();
    let error = run_pipeline(&config).expect_err("expected data integrity error");

    assert!(matches!(
        error,
        PipelineError::Cases(CasesCsvError::DataIntegrity { .. })
    ));
    temp.child("dataset.json").assert(predicate::path::missing());
}

#[test]
fn run_pipeline_rejects_malformed_variant_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_inputs(&temp, CASES_CSV, "{\"regions\": [");

    let config = settings_for(&temp).into_config();
    let error = run_pipeline(&config).expect_err("expected parse error");

    assert!(matches!(error, PipelineError::Variants(_)));
    temp.child("dataset.json").assert(predicate::path::missing());
}

#[test]
fn cluster_labels_canonicalize_to_categories() {
    assert_eq!(Category::from_cluster_label("B.1.617.2 (Delta, VOC)"), Category::Delta);
    assert_eq!(Category::from_cluster_label("XBB.1.5"), Category::NonWho);
}
