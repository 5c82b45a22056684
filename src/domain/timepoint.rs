use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::variant::Category;

/// Fraction of sequences per canonical category, sorted by category name.
pub type VariantFractions = BTreeMap<Category, f64>;

/// A dated sequencing snapshot converted to fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTimepoint {
    pub date: NaiveDate,
    pub fractions: VariantFractions,
}

impl DistributionTimepoint {
    pub fn new(date: NaiveDate, fractions: VariantFractions) -> Self {
        Self { date, fractions }
    }
}

/// The distribution used when no sequencing signal exists.
pub fn unknown_only() -> VariantFractions {
    BTreeMap::from([(Category::Unknown, 1.0)])
}
