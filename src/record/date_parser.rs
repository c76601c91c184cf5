use crate::ingest::{utils::clean_str, CellValue};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-/]").unwrap());

/// Canonical calendar date of a raw cell, or `None` when it cannot be read.
///
/// Native dates pass through untouched. Text is read positionally as
/// day-month-year. Every other shape is unknown.
pub fn normalize_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Number(_) | CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Parse `DD-MM-YYYY` / `DD/MM/YYYY` (separators may be mixed).
///
/// - a trailing clock time is ignored: `05-01-2024 10:30`
/// - a four-digit leading part means `YYYY-MM-DD`
/// - a two-digit year means `20YY`, never `19YY`
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let cleaned = clean_str(raw);
    let parts: Vec<&str> = DATE_SEPARATORS.split(&cleaned).map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    let last = parts[2]
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;

    let (year, month, day) = if parts[0].len() == 4 {
        (parse_year(parts[0])?, component(parts[1])?, component(last)?)
    } else {
        (parse_year(last)?, component(parts[1])?, component(parts[0])?)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_year(s: &str) -> Option<i32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.len() {
        2 => s.parse::<i32>().ok().map(|y| 2000 + y),
        4 => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn separator_does_not_change_the_date() {
        let mut day = ymd(2024, 1, 1);
        while day.year() == 2024 {
            let dashed = day.format("%d-%m-%Y").to_string();
            let slashed = day.format("%d/%m/%Y").to_string();
            assert_eq!(parse_date_text(&dashed), Some(day), "{}", dashed);
            assert_eq!(parse_date_text(&slashed), Some(day), "{}", slashed);
            day += Duration::days(1);
        }
    }

    #[test]
    fn positional_day_month_year() {
        assert_eq!(parse_date_text("05-01-2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date_text("5/1/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date_text(" \"15-01-2024\" "), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn impossible_dates_are_none() {
        assert_eq!(parse_date_text("31-02-2024"), None);
        assert_eq!(parse_date_text("29-02-2023"), None);
        assert_eq!(parse_date_text("12-13-2024"), None);
        assert_eq!(parse_date_text("00-01-2024"), None);
    }

    #[test]
    fn malformed_text_is_none() {
        for raw in ["N/A", "", "tomorrow", "05-01", "05-01-2024-1", "aa-bb-cccc", "5-1-202"] {
            assert_eq!(parse_date_text(raw), None, "{:?}", raw);
        }
    }

    #[test]
    fn trailing_time_is_ignored() {
        assert_eq!(parse_date_text("05-01-2024 10:30"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date_text("2024-01-05T10:30:00"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn iso_and_short_years() {
        assert_eq!(parse_date_text("2024-01-02"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date_text("05/01/24"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        for (text, year) in [("01-01-00", 2000), ("31-12-99", 2099), ("15-08-47", 2047)] {
            assert_eq!(parse_date_text(text).map(|d| d.year()), Some(year), "{}", text);
        }
        // three-digit years are neither form
        assert_eq!(parse_date_text("05-01-024"), None);
    }

    #[test]
    fn cell_shapes() {
        let d = ymd(2024, 3, 9);
        assert_eq!(normalize_date(&CellValue::Date(d)), Some(d));
        assert_eq!(
            normalize_date(&CellValue::DateTime(d.and_hms_opt(23, 59, 0).unwrap())),
            Some(d)
        );
        assert_eq!(normalize_date(&CellValue::Number(45296.0)), None);
        assert_eq!(normalize_date(&CellValue::Empty), None);
        assert_eq!(normalize_date(&CellValue::Bool(true)), None);
    }
}
