// src/report/mod.rs
//! Turns date groups into the page/section structure a rendering backend
//! consumes, and drives the whole rows-to-report pipeline.

pub mod layout;
pub mod render;

pub use layout::{majority_case_type, CaseType};

use crate::config::DiaryConfig;
use crate::diary::{
    group_records,
    paginate::{page_breaks, HeightPolicy},
    DateGroup,
};
use crate::error::DiaryError;
use crate::ingest::RawRow;
use crate::record::map_rows;
use crate::select::{search, select, Selection};
use crate::stage::{Language, StageCategory};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// One date block: title, column labels and a rectangular body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSection {
    pub title: String,
    pub head: Vec<String>,
    /// `body[i][c]` is the i-th case number of column `c`, or `""`.
    pub body: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    /// 1-based.
    pub number: usize,
    pub sections: Vec<PageSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub case_type: CaseType,
    pub pages: Vec<ReportPage>,
}

impl Report {
    pub fn sections(&self) -> impl Iterator<Item = &PageSection> {
        self.pages.iter().flat_map(|p| p.sections.iter())
    }

    /// Every non-blank body cell, page by page, row by row.
    pub fn case_numbers(&self) -> Vec<&str> {
        self.sections()
            .flat_map(|s| s.body.iter().flatten())
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// Lay one date group out under the board's columns.
pub fn build_section(group: &DateGroup, case_type: CaseType, language: Language) -> PageSection {
    let mut buckets = group.buckets();
    for stage in StageCategory::ALL {
        buckets.fold(stage, case_type.column_for(stage));
    }

    let columns = case_type.columns();
    let body = (0..buckets.row_count())
        .map(|i| {
            columns
                .iter()
                .map(|col| buckets.get(*col).get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    PageSection {
        title: group.key.title(),
        head: case_type.head(language),
        body,
    }
}

/// Build every section in group order and break them into pages.
pub fn assemble<P: HeightPolicy + ?Sized>(
    groups: &[DateGroup],
    case_type: CaseType,
    language: Language,
    policy: &P,
) -> Report {
    let sections: Vec<PageSection> = groups
        .iter()
        .map(|g| build_section(g, case_type, language))
        .collect();
    let rows: Vec<usize> = sections.iter().map(|s| s.body.len()).collect();

    let mut remaining = sections.into_iter();
    let pages = page_breaks(&rows, policy)
        .into_iter()
        .enumerate()
        .map(|(i, range)| ReportPage {
            number: i + 1,
            sections: remaining.by_ref().take(range.len()).collect(),
        })
        .collect();

    Report { case_type, pages }
}

/// Per-request inputs of [`compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryOptions {
    pub selection: Selection,
    /// `None` picks the majority board of the selected records.
    pub case_type: Option<CaseType>,
    pub search: Option<String>,
    pub config: DiaryConfig,
}

impl DiaryOptions {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            case_type: None,
            search: None,
            config: DiaryConfig::default(),
        }
    }

    pub fn with_case_type(mut self, case_type: CaseType) -> Self {
        self.case_type = Some(case_type);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_config(mut self, config: DiaryConfig) -> Self {
        self.config = config;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    Report(Report),
    /// The selection matched nothing; there is nothing to render.
    NoRecords,
}

/// Rows in, report out. Synchronous and stateless.
#[tracing::instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn compile(rows: &[RawRow], options: &DiaryOptions) -> Result<Compiled> {
    if rows.is_empty() {
        return Err(DiaryError::EmptyInput("input rows".into()).into());
    }
    options.config.aliases.validate()?;

    let records = map_rows(rows, &options.config.aliases, options.config.case_numbers);
    let selected = search(
        select(&records, &options.selection),
        options.search.as_deref(),
    );
    if selected.is_empty() {
        info!(records = records.len(), "selection is empty");
        return Ok(Compiled::NoRecords);
    }

    let case_type = options.case_type.unwrap_or_else(|| {
        majority_case_type(selected.iter().map(|r| r.case_number.as_str()))
    });
    let groups = group_records(selected.iter().copied());
    let report = assemble(
        &groups,
        case_type,
        options.config.language,
        &options.config.page,
    );
    info!(
        selected = selected.len(),
        groups = groups.len(),
        pages = report.pages.len(),
        case_type = case_type.as_str(),
        "compiled diary"
    );
    Ok(Compiled::Report(report))
}

/// Run [`compile`] on the blocking pool so the caller's runtime stays
/// responsive. The result is identical to calling it inline.
pub async fn compile_deferred(rows: Vec<RawRow>, options: DiaryOptions) -> Result<Compiled> {
    tokio::task::spawn_blocking(move || compile(&rows, &options))
        .await
        .context("diary compilation task panicked")?
}
