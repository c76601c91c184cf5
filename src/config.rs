use crate::diary::paginate::LinearHeightPolicy;
use crate::record::{fields::FieldAliases, CaseNumberPolicy};
use crate::stage::Language;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

/// Everything about a diary run that is not per-request.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// aliases:
///   case_number: ["Case No", "Case Number"]
/// case_numbers: strict
/// language: bilingual
/// page:
///   row: 6.5
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiaryConfig {
    pub aliases: FieldAliases,
    pub case_numbers: CaseNumberPolicy,
    pub page: LinearHeightPolicy,
    pub language: Language,
}

impl DiaryConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: DiaryConfig = serde_yaml::from_str(text).context("parsing diary config")?;
        config.aliases.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config =
            Self::from_yaml_str(&text).with_context(|| format!("in {}", path.display()))?;
        info!(path = %path.display(), "loaded diary config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiaryError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_document_is_the_default() -> Result<()> {
        assert_eq!(DiaryConfig::from_yaml_str("{}")?, DiaryConfig::default());
        Ok(())
    }

    #[test]
    fn partial_overrides_keep_other_defaults() -> Result<()> {
        let yaml = "aliases:\n  case_number: [\"Case No\"]\ncase_numbers: strict\nlanguage: marathi\npage:\n  row: 6.5\n";
        let config = DiaryConfig::from_yaml_str(yaml)?;
        assert_eq!(config.aliases.case_number, vec!["Case No".to_string()]);
        assert_eq!(config.aliases.date, FieldAliases::default().date);
        assert_eq!(config.case_numbers, CaseNumberPolicy::Strict);
        assert_eq!(config.language, Language::Marathi);
        assert_eq!(config.page.row, 6.5);
        assert_eq!(config.page.page_bottom, LinearHeightPolicy::default().page_bottom);
        Ok(())
    }

    #[test]
    fn conflicting_aliases_fail_to_load() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"aliases:\n  purpose: [\"Date\"]\n")?;
        let err = DiaryConfig::load(tmp.path()).unwrap_err();
        assert!(err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<DiaryError>(), Some(DiaryError::AliasConflict { .. }))));
        Ok(())
    }
}
