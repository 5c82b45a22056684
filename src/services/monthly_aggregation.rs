use std::collections::BTreeMap;

use crate::domain::case_record::DailyCaseRecord;
use crate::domain::monthly::MonthlyBucket;
use crate::domain::timepoint::VariantFractions;

/// Estimates cases per variant and sums them by calendar month.
///
/// `daily` holds one distribution per record, in record order. Days with no
/// positive case count are left out, so a month made only of such days does
/// not appear. Buckets are returned sorted by month key.
pub fn aggregate_monthly(records: &[DailyCaseRecord], daily: &[VariantFractions]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for (record, fractions) in records.iter().zip(daily) {
        let cases = record.new_confirmed;
        if cases <= 0.0 {
            continue;
        }

        let month = record.month_key();
        let bucket = months.entry(month.clone()).or_insert_with(|| MonthlyBucket {
            month,
            total_new_cases: 0.0,
            case_counts: BTreeMap::new(),
            percentages: BTreeMap::new(),
        });
        bucket.total_new_cases += cases;

        for (category, fraction) in fractions {
            if *fraction <= 0.0 {
                continue;
            }
            let estimated = cases * fraction;
            if estimated > 0.0 {
                *bucket.case_counts.entry(*category).or_insert(0.0) += estimated;
            }
        }
    }

    months
        .into_values()
        .map(|mut bucket| {
            if bucket.total_new_cases > 0.0 {
                let total = bucket.total_new_cases;
                bucket.percentages = bucket
                    .case_counts
                    .iter()
                    .map(|(category, count)| (*category, count / total))
                    .collect();
            }
            bucket
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timepoint::unknown_only;
    use crate::domain::variant::Category;
    use crate::test_support::{assert_close, build_case_series, build_fractions, on_date};

    #[test]
    fn all_unknown_month_sums_cases() {
        let records = build_case_series(&[(on_date(2021, 1, 1), 100.0), (on_date(2021, 1, 2), 200.0)]);
        let daily = vec![unknown_only(), unknown_only()];

        let months = aggregate_monthly(&records, &daily);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, "2021-01");
        assert_eq!(months[0].total_new_cases, 300.0);
        assert_eq!(months[0].case_counts, build_fractions(&[(Category::Unknown, 300.0)]));
        assert_eq!(months[0].percentages, build_fractions(&[(Category::Unknown, 1.0)]));
    }

    #[test]
    fn weights_fractions_by_daily_cases() {
        let records = build_case_series(&[
            (on_date(2021, 2, 27), 100.0),
            (on_date(2021, 2, 28), 300.0),
            (on_date(2021, 3, 1), 50.0),
        ]);
        let daily = vec![
            build_fractions(&[(Category::Alpha, 1.0)]),
            build_fractions(&[(Category::Alpha, 0.5), (Category::Beta, 0.5)]),
            build_fractions(&[(Category::Beta, 1.0), (Category::Gamma, 0.0)]),
        ];

        let months = aggregate_monthly(&records, &daily);
        assert_eq!(months.len(), 2);

        let february = &months[0];
        assert_eq!(february.month, "2021-02");
        assert_close(february.total_new_cases, 400.0);
        assert_close(february.case_counts[&Category::Alpha], 250.0);
        assert_close(february.case_counts[&Category::Beta], 150.0);
        assert_close(february.percentages[&Category::Alpha], 0.625);
        assert_close(february.percentages[&Category::Beta], 0.375);

        let march = &months[1];
        assert_eq!(march.month, "2021-03");
        assert!(!march.case_counts.contains_key(&Category::Gamma));
    }

    #[test]
    fn months_without_positive_cases_are_omitted() {
        let records = build_case_series(&[
            (on_date(2021, 4, 30), 0.0),
            (on_date(2021, 5, 1), 10.0),
        ]);
        let daily = vec![unknown_only(), unknown_only()];

        let months = aggregate_monthly(&records, &daily);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, "2021-05");
    }

    #[test]
    fn duplicate_dates_each_contribute() {
        let records = build_case_series(&[(on_date(2021, 6, 1), 10.0), (on_date(2021, 6, 1), 5.0)]);
        let daily = vec![unknown_only(), unknown_only()];

        let months = aggregate_monthly(&records, &daily);
        assert_eq!(months[0].total_new_cases, 15.0);
    }
}
