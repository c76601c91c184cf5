// src/diary/mod.rs
//! Groups selected records by hearing date and buckets each group by stage.

pub mod paginate;

use crate::record::CaseRecord;
use crate::stage::StageCategory;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Group identity. Ordering is chronological with `Unknown` last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Dated(NaiveDate),
    Unknown,
}

impl GroupKey {
    pub fn of(record: &CaseRecord) -> Self {
        record
            .normalized_date
            .map_or(GroupKey::Unknown, GroupKey::Dated)
    }

    /// `DD-MM-YYYY`, or the unknown-date sentinel.
    pub fn display(&self) -> String {
        match self {
            GroupKey::Dated(d) => d.format("%d-%m-%Y").to_string(),
            GroupKey::Unknown => UNKNOWN_DATE.to_string(),
        }
    }

    /// Full weekday name, taken from the date itself.
    pub fn weekday_name(&self) -> Option<String> {
        match self {
            GroupKey::Dated(d) => Some(d.format("%A").to_string()),
            GroupKey::Unknown => None,
        }
    }

    /// Section heading, e.g. `DATE: 05-01-2024 (FRIDAY)`.
    pub fn title(&self) -> String {
        match self.weekday_name() {
            Some(day) => format!("DATE: {} ({})", self.display(), day.to_uppercase()),
            None => format!("DATE: {}", self.display()),
        }
    }
}

/// Case numbers per stage, input order preserved within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageBuckets {
    lists: BTreeMap<StageCategory, Vec<String>>,
}

impl StageBuckets {
    pub fn push(&mut self, stage: StageCategory, case_number: String) {
        self.lists.entry(stage).or_default().push(case_number);
    }

    pub fn get(&self, stage: StageCategory) -> &[String] {
        self.lists.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Move every entry of `from` to the end of `into`.
    pub fn fold(&mut self, from: StageCategory, into: StageCategory) {
        if from == into {
            return;
        }
        if let Some(moved) = self.lists.remove(&from) {
            self.lists.entry(into).or_default().extend(moved);
        }
    }

    /// Rows needed to lay the buckets out side by side.
    pub fn row_count(&self) -> usize {
        self.lists.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All selected records sharing one hearing date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub key: GroupKey,
    pub records: Vec<CaseRecord>,
}

impl DateGroup {
    pub fn display_key(&self) -> String {
        self.key.display()
    }

    /// Classify members and bucket their case numbers.
    pub fn buckets(&self) -> StageBuckets {
        let mut buckets = StageBuckets::default();
        for record in &self.records {
            buckets.push(record.stage(), record.case_number.clone());
        }
        buckets
    }
}

/// Group records by hearing date, oldest first, unknown dates last.
pub fn group_records<'a, I>(records: I) -> Vec<DateGroup>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut groups: BTreeMap<GroupKey, Vec<CaseRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(GroupKey::of(record))
            .or_default()
            .push(record.clone());
    }
    debug!(groups = groups.len(), "grouped records by date");
    groups
        .into_iter()
        .map(|(key, records)| DateGroup { key, records })
        .collect()
}
