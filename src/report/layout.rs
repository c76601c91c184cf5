use crate::stage::{Language, StageCategory};
use serde::{Deserialize, Serialize};

/// Which board the diary is printed for. Decides the column layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Civil,
    Criminal,
}

/// Case-number prefixes that mark a civil matter.
const CIVIL_MARKERS: &[&str] = &["RCS", "CMA", "DARKHAST"];

const CIVIL_COLUMNS: &[StageCategory] = &StageCategory::ALL;

const CRIMINAL_COLUMNS: &[StageCategory] = &[
    StageCategory::Judgment,
    StageCategory::Arguments,
    StageCategory::Hearing,
    StageCategory::Evidence,
    StageCategory::EvidencePH,
    StageCategory::Other,
];

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Civil => "Civil",
            CaseType::Criminal => "Criminal",
        }
    }

    /// Civil when the case number mentions a civil register, else criminal.
    pub fn detect(case_number: &str) -> Self {
        let upper = case_number.to_uppercase();
        if CIVIL_MARKERS.iter().any(|m| upper.contains(m)) {
            CaseType::Civil
        } else {
            CaseType::Criminal
        }
    }

    /// Report columns, left to right.
    pub fn columns(&self) -> &'static [StageCategory] {
        match self {
            CaseType::Civil => CIVIL_COLUMNS,
            CaseType::Criminal => CRIMINAL_COLUMNS,
        }
    }

    /// Column a stage is printed under. Criminal boards have no issues
    /// column, so those cases go under "Other".
    pub fn column_for(&self, stage: StageCategory) -> StageCategory {
        if self.columns().contains(&stage) {
            stage
        } else {
            StageCategory::Other
        }
    }

    pub fn head(&self, language: Language) -> Vec<String> {
        self.columns().iter().map(|c| c.label(language)).collect()
    }
}

/// Pick the board for a mixed selection: the majority detected type,
/// civil on a tie.
pub fn majority_case_type<'a, I>(case_numbers: I) -> CaseType
where
    I: IntoIterator<Item = &'a str>,
{
    let (civil, criminal) =
        case_numbers
            .into_iter()
            .fold((0usize, 0usize), |(civ, crim), n| match CaseType::detect(n) {
                CaseType::Civil => (civ + 1, crim),
                CaseType::Criminal => (civ, crim + 1),
            });
    if civil >= criminal {
        CaseType::Civil
    } else {
        CaseType::Criminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_civil_registers() {
        assert_eq!(CaseType::detect("RCS 12/2023"), CaseType::Civil);
        assert_eq!(CaseType::detect("cma 4/2024"), CaseType::Civil);
        assert_eq!(CaseType::detect("Darkhast 7/2021"), CaseType::Civil);
        assert_eq!(CaseType::detect("SCC 40/2022"), CaseType::Criminal);
        assert_eq!(CaseType::detect(""), CaseType::Criminal);
    }

    #[test]
    fn civil_head_has_issues_criminal_does_not() {
        let civil = CaseType::Civil.head(Language::English);
        let criminal = CaseType::Criminal.head(Language::English);
        assert_eq!(civil.len(), 7);
        assert!(civil.contains(&"Issues".to_string()));
        assert_eq!(criminal.len(), 6);
        assert!(!criminal.contains(&"Issues".to_string()));
        assert_eq!(criminal.last().map(String::as_str), Some("Other"));
    }

    #[test]
    fn issues_fold_into_other_on_criminal_boards() {
        assert_eq!(
            CaseType::Criminal.column_for(StageCategory::Issues),
            StageCategory::Other
        );
        assert_eq!(
            CaseType::Civil.column_for(StageCategory::Issues),
            StageCategory::Issues
        );
    }

    #[test]
    fn majority_with_civil_tiebreak() {
        assert_eq!(majority_case_type(["RCS 1", "SCC 2", "SCC 3"]), CaseType::Criminal);
        assert_eq!(majority_case_type(["RCS 1", "SCC 2"]), CaseType::Civil);
        assert_eq!(majority_case_type(Vec::<&str>::new()), CaseType::Civil);
    }
}
