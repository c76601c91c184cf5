// src/ingest/mod.rs
//! Turns spreadsheet exports into loosely-typed [`RawRow`]s.
//!
//! This is the decoder boundary: nothing here knows which columns matter.
//! Headers are kept verbatim (padding, case and all); the field mapper in
//! [`crate::record`] is responsible for reconciling them.

pub mod utils;

use crate::error::DiaryError;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use glob::glob;
use serde::Serialize;
use serde_json::Value;
use std::{
    fmt,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use utils::{clean_str, extension_of};

/// One scalar cell as handed over by a decoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a text cell, collapsing blank strings to [`CellValue::Empty`].
    pub fn text(raw: &str) -> Self {
        let cleaned = clean_str(raw);
        if cleaned.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(cleaned)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::String(s) => CellValue::text(s),
            other => {
                debug!(?other, "nested JSON value treated as empty cell");
                CellValue::Empty
            }
        }
    }

    fn from_sheet(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::text(s),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            // durations have no calendar date
            Data::DateTime(dt) => dt.as_datetime().map(CellValue::moment).unwrap_or_default(),
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(CellValue::moment)
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(CellValue::Date))
                .unwrap_or_else(|_| CellValue::text(s)),
            Data::DurationIso(s) => CellValue::text(s),
            Data::Error(e) => {
                debug!(?e, "error cell treated as empty cell");
                CellValue::Empty
            }
        }
    }

    /// Midnight timestamps are plain dates.
    fn moment(dt: NaiveDateTime) -> Self {
        if dt.time() == NaiveTime::MIN {
            CellValue::Date(dt.date())
        } else {
            CellValue::DateTime(dt)
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            // spreadsheets hand integral case numbers over as floats
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%d-%m-%Y")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%d-%m-%Y %H:%M")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// A row keyed by whatever headers the export happened to use.
///
/// Key order is the decoder's column order. Lookups by canonical field go
/// through [`crate::record::fields`], never through exact key matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell; a repeated key overwrites the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank; decoders drop such rows.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Decode a CSV export whose first record is the header row.
pub fn read_csv<R: Read>(reader: R, source: &Path) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // exports often drop trailing empty cells
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header row of {}", source.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DiaryError::MissingHeaders(source.to_path_buf()).into());
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", source.display(), idx))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(h, _)| !h.trim().is_empty())
            .map(|(h, cell)| (h.clone(), CellValue::text(cell)))
            .collect();
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Decode a JSON export: an array of flat objects, one per row.
pub fn read_json(text: &str, source: &Path) -> Result<Vec<RawRow>> {
    let value: Value =
        serde_json::from_str(text).with_context(|| format!("parsing {}", source.display()))?;
    let Value::Array(items) = value else {
        return Err(DiaryError::NotTabular(source.to_path_buf()).into());
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        let Value::Object(map) = item else {
            return Err(DiaryError::NotTabular(source.to_path_buf()).into());
        };
        let row: RawRow = map
            .iter()
            .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
            .collect();
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Decode one worksheet whose first row is the header row.
pub fn read_sheet(range: &Range<Data>, source: &Path) -> Result<Vec<RawRow>> {
    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DiaryError::MissingHeaders(source.to_path_buf()).into());
    }

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let row: RawRow = headers
            .iter()
            .zip(cells.iter())
            .filter(|(h, _)| !h.trim().is_empty())
            .map(|(h, cell)| (h.clone(), CellValue::from_sheet(cell)))
            .collect();
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Decode the first worksheet of an Excel or OpenDocument workbook.
pub fn read_workbook(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(DiaryError::NotTabular(path.to_path_buf()).into());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet `{}` of {}", sheet, path.display()))?;
    debug!(sheet = %sheet, "first worksheet selected");
    read_sheet(&range, path)
}

/// Load one export file, choosing the decoder by extension.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let ext = extension_of(path).unwrap_or_default();
    let rows = match ext.as_str() {
        "csv" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_csv(file, path)?
        }
        "json" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            read_json(&text, path)?
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        _ => {
            return Err(DiaryError::UnsupportedFormat {
                path: path.to_path_buf(),
                ext,
            }
            .into())
        }
    };
    info!(rows = rows.len(), "decoded");
    Ok(rows)
}

/// Expand every pattern (plain paths or globs) and load all matching files,
/// in pattern order then path order.
///
/// Errors if nothing at all could be decoded: an empty export is the one
/// input condition the pipeline refuses to continue from.
pub fn load_inputs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<RawRow>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut matched: Vec<PathBuf> = glob(pattern)
            .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
            .filter_map(|entry| entry.ok())
            .collect();
        if matched.is_empty() {
            warn!(pattern, "no files matched");
        }
        matched.sort();
        paths.extend(matched);
    }

    let mut rows = Vec::new();
    for path in &paths {
        rows.extend(load_rows(path)?);
    }

    if rows.is_empty() {
        let joined = patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DiaryError::EmptyInput(joined).into());
    }
    Ok(rows)
}
