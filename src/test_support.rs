use chrono::NaiveDate;

use crate::domain::case_record::DailyCaseRecord;
use crate::domain::timepoint::{DistributionTimepoint, VariantFractions};
use crate::domain::variant::Category;

pub fn on_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_case_series(days: &[(NaiveDate, f64)]) -> Vec<DailyCaseRecord> {
    days.iter()
        .map(|(date, cases)| DailyCaseRecord::new(*date, *cases))
        .collect()
}

pub fn build_fractions(entries: &[(Category, f64)]) -> VariantFractions {
    entries.iter().copied().collect()
}

pub fn build_timepoint(date: NaiveDate, entries: &[(Category, f64)]) -> DistributionTimepoint {
    DistributionTimepoint::new(date, build_fractions(entries))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
