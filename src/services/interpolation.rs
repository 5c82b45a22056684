use chrono::NaiveDate;

use crate::domain::case_record::DailyCaseRecord;
use crate::domain::timepoint::{DistributionTimepoint, VariantFractions, unknown_only};
use crate::domain::variant::Category;

/// Below this total the missing share is assigned to `unknown`.
pub const REMAINDER_THRESHOLD: f64 = 0.999;

/// Assigns a variant distribution to every case record, in record order.
///
/// - No timepoints, or a date before the first timepoint => `{unknown: 1.0}`.
/// - A date after the last timepoint => the last timepoint's distribution.
/// - Otherwise linear interpolation between the bracketing timepoints, with any
///   shortfall below [`REMAINDER_THRESHOLD`] added to `unknown`.
///
/// `records` and `timepoints` must both be sorted ascending by date; the
/// bracket cursor only moves forward.
pub fn interpolate_daily(
    records: &[DailyCaseRecord],
    timepoints: &[DistributionTimepoint],
) -> Vec<VariantFractions> {
    let (Some(first), Some(last)) = (timepoints.first(), timepoints.last()) else {
        return records.iter().map(|_| unknown_only()).collect();
    };

    let mut cursor = 0usize;
    let mut daily = Vec::with_capacity(records.len());
    for record in records {
        let date = record.date;
        if date < first.date {
            daily.push(unknown_only());
            continue;
        }
        if date > last.date {
            daily.push(last.fractions.clone());
            continue;
        }

        while cursor + 1 < timepoints.len() && date > timepoints[cursor + 1].date {
            cursor += 1;
        }
        let start = &timepoints[cursor];
        let end = &timepoints[(cursor + 1).min(timepoints.len() - 1)];

        let mut fractions = if start.date == end.date || date == start.date {
            start.fractions.clone()
        } else if date == end.date {
            end.fractions.clone()
        } else {
            blend(start, end, elapsed_share(start.date, end.date, date))
        };
        assign_remainder(&mut fractions);
        daily.push(fractions);
    }
    daily
}

/// Share of the `start..end` span elapsed at `date`, on a continuous time axis.
fn elapsed_share(start: NaiveDate, end: NaiveDate, date: NaiveDate) -> f64 {
    let span = (end - start).num_seconds() as f64;
    if span == 0.0 {
        return 0.0;
    }
    (date - start).num_seconds() as f64 / span
}

fn blend(start: &DistributionTimepoint, end: &DistributionTimepoint, alpha: f64) -> VariantFractions {
    let categories = start.fractions.keys().chain(end.fractions.keys());
    categories
        .map(|category| {
            let p0 = start.fractions.get(category).copied().unwrap_or(0.0);
            let p1 = end.fractions.get(category).copied().unwrap_or(0.0);
            (*category, p0 + (p1 - p0) * alpha)
        })
        .collect()
}

fn assign_remainder(fractions: &mut VariantFractions) {
    let sum: f64 = fractions.values().sum();
    if sum < REMAINDER_THRESHOLD {
        *fractions.entry(Category::Unknown).or_insert(0.0) += 1.0 - sum;
    }
}
