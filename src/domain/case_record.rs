use chrono::NaiveDate;

/// One day of the case series after loading: never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCaseRecord {
    pub date: NaiveDate,
    pub new_confirmed: f64,
}

impl DailyCaseRecord {
    pub fn new(date: NaiveDate, new_confirmed: f64) -> Self {
        Self {
            date,
            new_confirmed,
        }
    }

    /// `YYYY-MM`, the key of the calendar month this record belongs to.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
