// src/record/mod.rs
pub mod date_parser;
pub mod fields;

use crate::ingest::{CellValue, RawRow};
use crate::report::CaseType;
use crate::stage::{self, StageCategory};
use chrono::NaiveDate;
use fields::{CanonicalField, FieldAliases};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// What to do with rows whose case number resolves to nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseNumberPolicy {
    /// Keep the row with an empty case number.
    #[default]
    Lenient,
    /// Drop the row.
    Strict,
}

/// One hearing entry after header reconciliation and date normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub case_number: String,
    /// The cell exactly as decoded, kept for display when normalization fails.
    pub raw_date: CellValue,
    pub normalized_date: Option<NaiveDate>,
    pub purpose: String,
}

impl CaseRecord {
    /// Resolve the canonical fields of `row` and normalize its date.
    pub fn from_row(row: &RawRow, aliases: &FieldAliases) -> Self {
        let raw_date = aliases.resolve(row, CanonicalField::Date);
        let normalized_date = date_parser::normalize_date(&raw_date);
        if normalized_date.is_none() && !raw_date.is_empty() {
            debug!(raw = %raw_date, "unparseable hearing date");
        }
        Self {
            case_number: aliases.resolve(row, CanonicalField::CaseNumber).to_string(),
            raw_date,
            normalized_date,
            purpose: aliases.resolve(row, CanonicalField::Purpose).to_string(),
        }
    }

    /// Canonical `DD-MM-YYYY`, or the raw cell text when the date is unknown.
    pub fn display_date(&self) -> String {
        match self.normalized_date {
            Some(d) => d.format("%d-%m-%Y").to_string(),
            None => self.raw_date.to_string(),
        }
    }

    pub fn stage(&self) -> StageCategory {
        stage::classify(&self.purpose)
    }

    pub fn case_type(&self) -> CaseType {
        CaseType::detect(&self.case_number)
    }
}

/// Map every row to a [`CaseRecord`].
///
/// Unmatched canonical fields are reported once per batch, not per row.
pub fn map_rows(rows: &[RawRow], aliases: &FieldAliases, policy: CaseNumberPolicy) -> Vec<CaseRecord> {
    let mut reported: HashSet<CanonicalField> = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        for field in aliases.unmatched(row) {
            if reported.insert(field) {
                let headers: Vec<&str> = row.keys().collect();
                warn!(
                    field = field.as_str(),
                    ?headers,
                    "no column matched; defaulting to empty"
                );
            }
        }

        let record = CaseRecord::from_row(row, aliases);
        if policy == CaseNumberPolicy::Strict && record.case_number.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(record);
    }

    if dropped > 0 {
        debug!(dropped, "rows without a case number dropped");
    }
    records
}
