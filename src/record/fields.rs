use crate::error::DiaryError;
use crate::ingest::{utils::header_key, CellValue, RawRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three attributes every row is resolved into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    CaseNumber,
    Date,
    Purpose,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 3] = [
        CanonicalField::CaseNumber,
        CanonicalField::Date,
        CanonicalField::Purpose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::CaseNumber => "case_number",
            CanonicalField::Date => "date",
            CanonicalField::Purpose => "purpose",
        }
    }
}

/// Accepted header spellings per canonical field, in preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub case_number: Vec<String>,
    pub date: Vec<String>,
    pub purpose: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            case_number: owned(&["Cases", "Case Number", "Case"]),
            date: owned(&["Next Date", "Date"]),
            purpose: owned(&["Next Purpose", "Purpose"]),
        }
    }
}

impl FieldAliases {
    pub fn for_field(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::CaseNumber => &self.case_number,
            CanonicalField::Date => &self.date,
            CanonicalField::Purpose => &self.purpose,
        }
    }

    /// Reject alias sets where one header would be claimed by two fields.
    ///
    /// With mutually exclusive aliases the first-hit lookup in
    /// [`resolve_field`] can only ever disagree with a best-hit lookup inside
    /// a single field, never across fields.
    pub fn validate(&self) -> Result<(), DiaryError> {
        let mut owner: HashMap<String, CanonicalField> = HashMap::new();
        for field in CanonicalField::ALL {
            for alias in self.for_field(field) {
                let key = header_key(alias);
                match owner.get(&key).copied() {
                    Some(prev) if prev != field => {
                        return Err(DiaryError::AliasConflict {
                            alias: alias.clone(),
                            first: prev.as_str(),
                            second: field.as_str(),
                        });
                    }
                    _ => {
                        owner.insert(key, field);
                    }
                }
            }
        }
        Ok(())
    }

    /// Value of `field` in `row`, or [`CellValue::Empty`] when no header matches.
    pub fn resolve(&self, row: &RawRow, field: CanonicalField) -> CellValue {
        resolve_field(row, self.for_field(field))
    }

    /// Fields for which no header in `row` matched any alias.
    pub fn unmatched(&self, row: &RawRow) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| matching_key(row, self.for_field(*f)).is_none())
            .collect()
    }
}

fn matching_key<'r>(row: &'r RawRow, aliases: &[String]) -> Option<&'r CellValue> {
    let wanted: Vec<String> = aliases.iter().map(|a| header_key(a)).collect();
    row.iter()
        .find(|(key, _)| {
            let key = header_key(key);
            wanted.iter().any(|w| *w == key)
        })
        .map(|(_, value)| value)
}

/// First row key (in the row's own order) whose trimmed, case-insensitive
/// form equals any alias.
pub fn resolve_field(row: &RawRow, aliases: &[String]) -> CellValue {
    matching_key(row, aliases).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_padded_and_mixed_case_headers() {
        let row: RawRow = vec![(" CASE NUMBER  ", "RCS 12/2023"), ("next date", "05-01-2024")]
            .into_iter()
            .collect();
        let map = FieldAliases::default();
        assert_eq!(
            map.resolve(&row, CanonicalField::CaseNumber),
            CellValue::Text("RCS 12/2023".into())
        );
        assert_eq!(
            map.resolve(&row, CanonicalField::Date),
            CellValue::Text("05-01-2024".into())
        );
    }

    #[test]
    fn missing_header_resolves_to_empty() {
        let row: RawRow = vec![("Remarks", "adjourned")].into_iter().collect();
        let map = FieldAliases::default();
        assert_eq!(map.resolve(&row, CanonicalField::Purpose), CellValue::Empty);
        assert_eq!(map.unmatched(&row), CanonicalField::ALL.to_vec());
    }

    #[test]
    fn first_hit_follows_row_order_not_alias_order() {
        // "Case" is listed after "Cases", but the row presents it first
        let row: RawRow = vec![("Case", "A1"), ("Cases", "B2")].into_iter().collect();
        assert_eq!(
            resolve_field(&row, &aliases(&["Cases", "Case"])),
            CellValue::Text("A1".into())
        );
    }

    #[test]
    fn default_aliases_are_mutually_exclusive() {
        assert!(FieldAliases::default().validate().is_ok());
    }

    #[test]
    fn overlapping_aliases_are_rejected() {
        let map = FieldAliases {
            case_number: aliases(&["Case", "Date"]),
            ..FieldAliases::default()
        };
        match map.validate() {
            Err(DiaryError::AliasConflict { alias, first, second }) => {
                assert_eq!(alias, "Date");
                assert_eq!(first, "case_number");
                assert_eq!(second, "date");
            }
            other => panic!("expected alias conflict, got {:?}", other),
        }
    }
}
