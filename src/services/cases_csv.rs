use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, info, warn};
use thiserror::Error;

use crate::domain::case_record::DailyCaseRecord;

const DATE_COLUMN: &str = "date";
const NEW_CONFIRMED_COLUMN: &str = "new_confirmed";

#[derive(Error, Debug)]
pub enum CasesCsvError {
    #[error("failed to open cases csv {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read cases csv {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("invalid date in {path} line {line}: {value} (expected YYYY-MM-DD)")]
    InvalidDate {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("no daily cases found in {path}")]
    DataIntegrity { path: PathBuf },
}

/// Case series as loaded from the table, plus bookkeeping about the rows.
#[derive(Debug, Clone)]
pub struct CaseSeries {
    /// Sorted ascending by date; never empty.
    pub records: Vec<DailyCaseRecord>,
    pub rows_read: usize,
    /// Rows considered after the trailing row was dropped.
    pub candidate_rows: usize,
    pub skipped_blank_dates: usize,
}

/// Loads the daily case table at `path`.
///
/// # Errors
/// - Returns an error when the file cannot be opened or is not valid CSV.
/// - Returns an error when a non-blank `date` is not `YYYY-MM-DD`.
/// - Returns [`CasesCsvError::DataIntegrity`] when no record survives loading.
pub fn load_case_series<P: AsRef<Path>>(path: P) -> Result<CaseSeries, CasesCsvError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CasesCsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_case_series(file, path)
}

/// Parses a case table from any reader. `path` is only used in errors.
///
/// The last row is always dropped because the upstream export ends with an
/// incomplete day. Blank dates are skipped, case counts are parsed leniently
/// and clamped at zero.
pub fn read_case_series<R: Read>(input: R, path: &Path) -> Result<CaseSeries, CasesCsvError> {
    let csv_error = |source: csv::Error| CasesCsvError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let date_index = column_index(&headers, DATE_COLUMN);
    let cases_index = column_index(&headers, NEW_CONFIRMED_COLUMN);
    if date_index.is_none() {
        warn!("{} has no '{DATE_COLUMN}' column", path.display());
    }

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;
    let rows_read = rows.len();
    let candidates = &rows[..rows_read.saturating_sub(1)];

    let mut records = Vec::with_capacity(candidates.len());
    let mut skipped_blank_dates = 0usize;
    for (idx, row) in candidates.iter().enumerate() {
        // header is line 1
        let line = idx + 2;
        let date_value = field(row, date_index);
        if date_value.is_empty() {
            debug!("skipping line {line}: blank date");
            skipped_blank_dates += 1;
            continue;
        }
        let date = NaiveDate::parse_from_str(date_value, "%Y-%m-%d").map_err(|_| {
            CasesCsvError::InvalidDate {
                path: path.to_path_buf(),
                line,
                value: date_value.to_string(),
            }
        })?;
        let new_confirmed = parse_case_count(field(row, cases_index));
        records.push(DailyCaseRecord::new(date, new_confirmed));
    }

    if records.is_empty() {
        warn!(
            "{} yielded no usable rows ({rows_read} read)",
            path.display()
        );
        return Err(CasesCsvError::DataIntegrity {
            path: path.to_path_buf(),
        });
    }

    // stable: duplicate dates keep their file order
    records.sort_by_key(|record| record.date);

    info!(
        "loaded {} daily case records from {} ({rows_read} rows read, last row dropped)",
        records.len(),
        path.display()
    );

    Ok(CaseSeries {
        records,
        rows_read,
        candidate_rows: candidates.len(),
        skipped_blank_dates,
    })
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn field(row: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).unwrap_or("")
}

/// Blank or malformed counts read as 0; negatives are clamped to 0.
fn parse_case_count(value: &str) -> f64 {
    let parsed = value.parse::<f64>().unwrap_or(0.0);
    if parsed.is_finite() { parsed.max(0.0) } else { 0.0 }
}
