use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Vertical-space estimate for one rendering backend.
///
/// Units are whatever the backend measures in; only comparisons between
/// values of the same policy matter. `section_height` must not decrease as
/// `rows` grows.
pub trait HeightPolicy {
    /// Cursor position where content starts on a fresh page.
    fn page_top(&self) -> f64;
    /// Lowest cursor position content may reach.
    fn page_bottom(&self) -> f64;
    /// Space one date section with `rows` body rows takes, trailer included.
    fn section_height(&self, rows: usize) -> f64;
}

/// Fixed allowances plus a per-row term. Defaults are millimetres on A4
/// portrait with a 9pt grid table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearHeightPolicy {
    pub page_top: f64,
    pub page_bottom: f64,
    /// Date title plus the seat/rise line.
    pub title: f64,
    pub table_head: f64,
    pub row: f64,
    /// Gap after the table plus the signature line.
    pub trailer: f64,
}

impl Default for LinearHeightPolicy {
    fn default() -> Self {
        Self {
            page_top: 20.0,
            page_bottom: 277.0,
            title: 10.0,
            table_head: 8.0,
            row: 7.0,
            trailer: 27.0,
        }
    }
}

impl HeightPolicy for LinearHeightPolicy {
    fn page_top(&self) -> f64 {
        self.page_top
    }

    fn page_bottom(&self) -> f64 {
        self.page_bottom
    }

    fn section_height(&self, rows: usize) -> f64 {
        self.title + self.table_head + self.row * rows as f64 + self.trailer
    }
}

/// Split consecutive sections into pages.
///
/// A section joins the current page when it fits in what is left; otherwise
/// it opens a new page. A section is never split, and a section taller than
/// a whole page still gets a page to itself.
pub fn page_breaks<P: HeightPolicy + ?Sized>(rows: &[usize], policy: &P) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut cursor = policy.page_top();

    for (i, &count) in rows.iter().enumerate() {
        let height = policy.section_height(count);
        if i > start && cursor + height > policy.page_bottom() {
            pages.push(start..i);
            start = i;
            cursor = policy.page_top();
        }
        cursor += height;
    }
    if start < rows.len() {
        pages.push(start..rows.len());
    }
    pages
}
