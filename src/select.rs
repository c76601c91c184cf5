use crate::error::DiaryError;
use crate::record::CaseRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which hearing dates a report covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Selection {
    /// Every record, including those whose date could not be read.
    All,
    /// Whole days from `start` through `end`, both included.
    Range { start: NaiveDate, end: NaiveDate },
}

impl Selection {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Selection::Range { start, end }
    }

    /// Build a range from two `YYYY-MM-DD` strings.
    pub fn parse_range(start: &str, end: &str) -> Result<Self, DiaryError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| DiaryError::InvalidRange(s.to_string()))
        };
        Ok(Selection::range(parse(start)?, parse(end)?))
    }

    /// An inverted range simply matches nothing.
    pub fn contains(&self, record: &CaseRecord) -> bool {
        match self {
            Selection::All => true,
            Selection::Range { start, end } => record
                .normalized_date
                .map_or(false, |d| *start <= d && d <= *end),
        }
    }
}

/// Records inside `selection`, in input order.
pub fn select<'a>(records: &'a [CaseRecord], selection: &Selection) -> Vec<&'a CaseRecord> {
    records.iter().filter(|r| selection.contains(r)).collect()
}

/// Case-insensitive substring search over case number, purpose and date text.
pub fn matches_search(record: &CaseRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        record.case_number.to_lowercase(),
        record.purpose.to_lowercase(),
        record.raw_date.to_string().to_lowercase(),
        record.display_date().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(&term))
}

/// Narrow an existing selection by a free-text term; `None` keeps everything.
pub fn search<'a>(records: Vec<&'a CaseRecord>, term: Option<&str>) -> Vec<&'a CaseRecord> {
    match term {
        Some(t) => records.into_iter().filter(|r| matches_search(r, t)).collect(),
        None => records,
    }
}
