use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the pipeline before grouping.
///
/// Per-record problems (bad dates, unknown headers) never show up here; they
/// degrade to empty fields instead.
#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("no rows could be decoded from {0}")]
    EmptyInput(String),

    #[error("{0} has no header row")]
    MissingHeaders(PathBuf),

    #[error("unsupported input format `{ext}` for {path}")]
    UnsupportedFormat { path: PathBuf, ext: String },

    #[error("{0} is not a tabular export (expected an array of objects)")]
    NotTabular(PathBuf),

    #[error("header alias `{alias}` is claimed by both `{first}` and `{second}`")]
    AliasConflict {
        alias: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid date range bound `{0}` (expected YYYY-MM-DD)")]
    InvalidRange(String),
}
