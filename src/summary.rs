//! Per-day civil/criminal counts, the numbers behind a calendar view.

use crate::record::CaseRecord;
use crate::report::CaseType;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub weekday: String,
    pub civil: usize,
    pub criminal: usize,
    pub total: usize,
    /// Sundays carry no sitting.
    pub weekly_off: bool,
}

/// Count dated records per day; records without a usable date are skipped.
pub fn day_summaries<'a, I>(records: I) -> Vec<DaySummary>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut counts: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for record in records {
        let Some(date) = record.normalized_date else {
            continue;
        };
        let entry = counts.entry(date).or_default();
        match record.case_type() {
            CaseType::Civil => entry.0 += 1,
            CaseType::Criminal => entry.1 += 1,
        }
    }

    counts
        .into_iter()
        .map(|(date, (civil, criminal))| DaySummary {
            date,
            weekday: date.format("%A").to_string(),
            civil,
            criminal,
            total: civil + criminal,
            weekly_off: date.weekday() == Weekday::Sun,
        })
        .collect()
}

/// Keep only the days of one calendar month.
pub fn for_month(summaries: Vec<DaySummary>, year: i32, month: u32) -> Vec<DaySummary> {
    summaries
        .into_iter()
        .filter(|s| s.date.year() == year && s.date.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::CellValue;
    use crate::record::date_parser::parse_date_text;

    fn rec(case: &str, date: &str) -> CaseRecord {
        CaseRecord {
            case_number: case.to_string(),
            raw_date: CellValue::text(date),
            normalized_date: parse_date_text(date),
            purpose: String::new(),
        }
    }

    #[test]
    fn counts_split_by_board() {
        let records = vec![
            rec("RCS 1/2024", "05-01-2024"),
            rec("SCC 2/2024", "05-01-2024"),
            rec("SCC 3/2024", "05-01-2024"),
            rec("CMA 4/2024", "07-01-2024"),
            rec("RCS 5/2024", "N/A"),
        ];
        let days = day_summaries(&records);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].civil, 1);
        assert_eq!(days[0].criminal, 2);
        assert_eq!(days[0].total, 3);
        assert_eq!(days[0].weekday, "Friday");
        assert!(!days[0].weekly_off);

        // 7 January 2024 was a Sunday
        assert!(days[1].weekly_off);
        assert_eq!(days[1].civil, 1);
    }

    #[test]
    fn month_filter() {
        let records = vec![rec("A", "31-01-2024"), rec("B", "01-02-2024")];
        let feb = for_month(day_summaries(&records), 2024, 2);
        assert_eq!(feb.len(), 1);
        assert_eq!(feb[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
