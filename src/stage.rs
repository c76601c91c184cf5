//! Hearing-stage taxonomy and the purpose classifier.

use serde::{Deserialize, Serialize};

/// Where a case stands on its next hearing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageCategory {
    Judgment,
    Arguments,
    Hearing,
    Evidence,
    EvidencePH,
    Issues,
    Other,
}

/// Label language for report column headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Marathi,
    Bilingual,
}

impl StageCategory {
    /// Report column order.
    pub const ALL: [StageCategory; 7] = [
        StageCategory::Judgment,
        StageCategory::Arguments,
        StageCategory::Hearing,
        StageCategory::Evidence,
        StageCategory::EvidencePH,
        StageCategory::Issues,
        StageCategory::Other,
    ];

    pub fn english(&self) -> &'static str {
        match self {
            StageCategory::Judgment => "Judgment",
            StageCategory::Arguments => "Arguments",
            StageCategory::Hearing => "Hearing",
            StageCategory::Evidence => "Evidence",
            StageCategory::EvidencePH => "Evidence (P.H.)",
            StageCategory::Issues => "Issues",
            StageCategory::Other => "Other",
        }
    }

    pub fn marathi(&self) -> &'static str {
        match self {
            StageCategory::Judgment => "निकाल",
            StageCategory::Arguments => "युक्तिवाद",
            StageCategory::Hearing => "सुनावणी",
            StageCategory::Evidence => "पुरावा",
            StageCategory::EvidencePH => "पुरावा (अंशतः ऐकलेले)",
            StageCategory::Issues => "मुद्दे",
            StageCategory::Other => "इतर",
        }
    }

    pub fn label(&self, language: Language) -> String {
        match language {
            Language::English => self.english().to_string(),
            Language::Marathi => self.marathi().to_string(),
            Language::Bilingual => format!("{} / {}", self.english(), self.marathi()),
        }
    }
}

/// One entry of the ordered keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRule {
    pub category: StageCategory,
    pub keywords: &'static [&'static str],
}

impl StageRule {
    fn matches(&self, purpose_lower: &str) -> bool {
        self.keywords.iter().any(|k| purpose_lower.contains(k))
    }
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
///
/// "part heard" sits above "evidence" so that "Part Heard evidence" lands in
/// [`StageCategory::EvidencePH`].
pub const STAGE_RULES: &[StageRule] = &[
    StageRule {
        category: StageCategory::Judgment,
        keywords: &["judgment", "order"],
    },
    StageRule {
        category: StageCategory::Arguments,
        keywords: &["argument"],
    },
    StageRule {
        category: StageCategory::EvidencePH,
        keywords: &["part heard"],
    },
    StageRule {
        category: StageCategory::Evidence,
        keywords: &["evidence", "witness"],
    },
    StageRule {
        category: StageCategory::Issues,
        keywords: &["issue"],
    },
    StageRule {
        category: StageCategory::Hearing,
        keywords: &[
            "hearing",
            "say",
            "compliance",
            "summons",
            "notice",
            "citation",
            "steps",
            "awaiting",
            "amended",
        ],
    },
];

/// Classify a free-text hearing purpose. Total: anything unmatched is `Other`.
pub fn classify(purpose: &str) -> StageCategory {
    let lower = purpose.to_lowercase();
    STAGE_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.category)
        .unwrap_or(StageCategory::Other)
}
