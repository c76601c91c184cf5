//! Reference rendering backends.

use super::{PageSection, Report};
use anyhow::{Context, Result};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Consumes a finished [`Report`] and writes a document.
pub trait Renderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()>;
}

/// Pretty-printed JSON of the report structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, report).context("writing report JSON")?;
        writeln!(out)?;
        Ok(())
    }
}

/// Plain-text court board: one form feed between pages, grid tables.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub seat_line: String,
    pub signature_line: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            seat_line: "Took Seat at: _________  Rise at: _________".to_string(),
            signature_line: "Officer Signature: ____________________".to_string(),
        }
    }
}

impl TextRenderer {
    fn widths(section: &PageSection) -> Vec<usize> {
        section
            .head
            .iter()
            .enumerate()
            .map(|(c, label)| {
                section
                    .body
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(label.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn rule(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        // pad by display columns; Devanagari vowel signs take none
        for (cell, w) in cells.iter().zip(widths) {
            let pad = w.saturating_sub(cell.width());
            line.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
        }
        line
    }

    fn section(&self, section: &PageSection, out: &mut dyn Write) -> Result<()> {
        let widths = Self::widths(section);
        let rule = Self::rule(&widths);
        let table_width = rule.chars().count();

        writeln!(out, "{}", section.title)?;
        writeln!(out, "{}", self.seat_line)?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "{}", Self::line(&section.head, &widths))?;
        writeln!(out, "{}", rule)?;
        for row in &section.body {
            writeln!(out, "{}", Self::line(row, &widths))?;
        }
        writeln!(out, "{}", rule)?;
        writeln!(out, "{:>width$}", self.signature_line, width = table_width)?;
        writeln!(out)?;
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        let total = report.pages.len();
        for page in &report.pages {
            if page.number > 1 {
                write!(out, "\x0c")?;
            }
            writeln!(
                out,
                "{} Case Board - Page {} of {}",
                report.case_type.as_str(),
                page.number,
                total
            )?;
            writeln!(out)?;
            for section in &page.sections {
                self.section(section, out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CaseType, ReportPage};
    use crate::stage::Language;

    fn sample() -> Report {
        Report {
            case_type: CaseType::Civil,
            pages: vec![
                ReportPage {
                    number: 1,
                    sections: vec![PageSection {
                        title: "DATE: 05-01-2024 (FRIDAY)".into(),
                        head: vec!["Judgment".into(), "Other".into()],
                        body: vec![
                            vec!["RCS 12/2023".into(), "".into()],
                            vec!["".into(), "CMA 4".into()],
                        ],
                    }],
                },
                ReportPage {
                    number: 2,
                    sections: vec![PageSection {
                        title: "DATE: 08-01-2024 (MONDAY)".into(),
                        head: vec!["Judgment".into(), "Other".into()],
                        body: vec![vec!["RCS 1".into(), "".into()]],
                    }],
                },
            ],
        }
    }

    #[test]
    fn text_board_layout() -> Result<()> {
        let mut buf = Vec::new();
        TextRenderer::default().render(&sample(), &mut buf)?;
        let text = String::from_utf8(buf)?;

        assert!(text.starts_with("Civil Case Board - Page 1 of 2\n"));
        assert!(text.contains("DATE: 05-01-2024 (FRIDAY)\nTook Seat at:"));
        assert!(text.contains("| Judgment    | Other |"));
        assert!(text.contains("| RCS 12/2023 |       |"));
        assert!(text.contains("|             | CMA 4 |"));
        assert_eq!(text.matches('\x0c').count(), 1);
        assert_eq!(text.matches("Officer Signature").count(), 2);
        Ok(())
    }

    #[test]
    fn marathi_grid_lines_share_one_display_width() -> Result<()> {
        let head = CaseType::Civil.head(Language::Bilingual);
        let mut row = vec![String::new(); head.len()];
        row[0] = "RCS 12/2023".into();
        let report = Report {
            case_type: CaseType::Civil,
            pages: vec![ReportPage {
                number: 1,
                sections: vec![PageSection {
                    title: "DATE: 05-01-2024 (FRIDAY)".into(),
                    head,
                    body: vec![row],
                }],
            }],
        };

        let mut buf = Vec::new();
        TextRenderer::default().render(&report, &mut buf)?;
        let text = String::from_utf8(buf)?;
        let grid: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .collect();
        assert_eq!(grid.len(), 5);
        let first = grid[0].width();
        for line in &grid {
            assert_eq!(line.width(), first, "{}", line);
        }
        Ok(())
    }

    #[test]
    fn json_keeps_structure() -> Result<()> {
        let mut buf = Vec::new();
        JsonRenderer.render(&sample(), &mut buf)?;
        let value: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(value["case_type"], "civil");
        assert_eq!(value["pages"][1]["number"], 2);
        assert_eq!(value["pages"][0]["sections"][0]["body"][1][1], "CMA 4");
        Ok(())
    }
}
