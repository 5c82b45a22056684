use std::collections::BTreeMap;

use crate::domain::variant::Category;

/// Estimated cases per category for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    /// `YYYY-MM`
    pub month: String,
    pub total_new_cases: f64,
    pub case_counts: BTreeMap<Category, f64>,
    /// `case_counts / total_new_cases`; empty when the month has no cases.
    pub percentages: BTreeMap<Category, f64>,
}
