//! Emission of abstract render instructions for the two views, plus the
//! concrete formatters that materialize them as ANSI text or JSON.
//!
//! The builders produce plain data (`SummaryTable`, `SourceView`) so a
//! renderer — ours or an embedding UI — decides how to materialize rows,
//! gutters and paint ranges. Formatters re-derive cell colors from the
//! cell values, so a consumer that reorders rows can re-annotate by
//! calling [`color_annotate_cell`] again.

use std::fmt::Write;

use serde::Serialize;

use crate::error::{CovviewError, Result};
use crate::format::{center, is_percentage_string, parse_percentage};
use crate::model::{ColorBucket, CoverageClass, FileCoverageLine, ReportMeta, SummaryRow};

/// Column header of the summary table.
pub const SUMMARY_COLUMNS: [&str; 9] = [
    "File",
    "Statements Covered",
    "Statements",
    "Branches Covered",
    "Branches",
    "Functions Covered",
    "Functions",
    "Lines Covered",
    "Lines",
];

/// A summary report rendered down to rows and columns.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    pub title: String,
    pub category_summary: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    /// Generic constructor: any column/row set. An empty column set is a
    /// caller configuration error, not a report defect.
    pub fn new(
        title: String,
        category_summary: String,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(CovviewError::Config("empty table column set".into()));
        }
        Ok(Self {
            title,
            category_summary,
            columns,
            rows,
        })
    }
}

/// Turn parsed summary rows into the fixed-header table.
pub fn build_summary_table(meta: &ReportMeta, rows: &[SummaryRow]) -> Result<SummaryTable> {
    let cells = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(row.stats.len() + 1);
            cells.push(row.identifier.clone());
            cells.extend(row.stats.iter().cloned());
            cells
        })
        .collect();

    SummaryTable::new(
        meta.title.clone(),
        meta.category_summary.clone(),
        SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        cells,
    )
}

/// Color classification for a table cell: percentage cells get a bucket,
/// everything else is left unannotated.
#[must_use]
pub fn color_annotate_cell(value: &str) -> Option<ColorBucket> {
    if !is_percentage_string(value) {
        return None;
    }
    parse_percentage(value)
        .ok()
        .map(ColorBucket::from_percentage)
}

/// Style of one paint range within a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaintStyle {
    /// The reconstructed uncovered region of the code text.
    Uncovered,
    /// Gutter of a line whose indicator is uncovered.
    GutterUncovered,
    /// Gutter of a line whose indicator is covered.
    GutterCovered,
}

/// A half-open byte range of one line to be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaintRange {
    pub start: usize,
    pub end: usize,
    pub style: PaintStyle,
}

/// One line of the annotated source view: gutter plus code text, with the
/// ranges to paint over it.
#[derive(Debug, Clone, Serialize)]
pub struct SourceLine {
    pub text: String,
    pub paints: Vec<PaintRange>,
}

/// A per-file report rendered down to annotated lines.
#[derive(Debug, Clone, Serialize)]
pub struct SourceView {
    pub filename: String,
    pub lines: Vec<SourceLine>,
}

/// Turn reconstructed file lines into the annotated source view. Each
/// line starts with a fixed-width gutter showing the indicator text,
/// centered to the longest indicator plus one.
#[must_use]
pub fn build_source_view(filename: &str, lines: &[FileCoverageLine]) -> SourceView {
    let gutter_width = lines
        .iter()
        .map(|line| line.annotation.text.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let rendered = lines
        .iter()
        .map(|line| {
            let gutter = center(&line.annotation.text, gutter_width);
            let mut paints = Vec::new();

            match line.annotation.class {
                CoverageClass::Uncovered => paints.push(PaintRange {
                    start: 0,
                    end: gutter.len(),
                    style: PaintStyle::GutterUncovered,
                }),
                CoverageClass::Covered => paints.push(PaintRange {
                    start: 0,
                    end: gutter.len(),
                    style: PaintStyle::GutterCovered,
                }),
                CoverageClass::Unknown => {}
            }

            if let Some(span) = line.uncovered {
                paints.push(PaintRange {
                    start: gutter.len() + span.start,
                    end: gutter.len() + span.end,
                    style: PaintStyle::Uncovered,
                });
            }

            SourceLine {
                text: format!("{gutter}{}", line.text),
                paints,
            }
        })
        .collect();

    SourceView {
        filename: filename.to_string(),
        lines: rendered,
    }
}

/// Materializes the abstract views as displayable strings.
pub trait Formatter {
    fn summary(&self, table: &SummaryTable) -> String;
    fn source(&self, view: &SourceView) -> String;
}

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_RED: &str = "\u{1b}[31m";
const ANSI_GREEN: &str = "\u{1b}[32m";
const ANSI_YELLOW: &str = "\u{1b}[33m";
const ANSI_RED_BG: &str = "\u{1b}[41m";
const ANSI_GREEN_ON_BLACK: &str = "\u{1b}[32;40m";

fn bucket_code(bucket: ColorBucket) -> &'static str {
    match bucket {
        ColorBucket::Green => ANSI_GREEN,
        ColorBucket::Yellow => ANSI_YELLOW,
        ColorBucket::Red => ANSI_RED,
    }
}

fn paint_code(style: PaintStyle) -> &'static str {
    match style {
        PaintStyle::Uncovered => ANSI_RED_BG,
        PaintStyle::GutterUncovered => ANSI_RED,
        PaintStyle::GutterCovered => ANSI_GREEN_ON_BLACK,
    }
}

/// Plain-text formatter with optional ANSI coloring.
pub struct TextFormatter {
    pub color: bool,
}

impl TextFormatter {
    fn cell(&self, value: &str, width: usize, right_align: bool) -> String {
        let pad = width.saturating_sub(value.chars().count());
        let padded = if right_align {
            format!("{}{}", " ".repeat(pad), value)
        } else {
            format!("{}{}", value, " ".repeat(pad))
        };
        if self.color {
            if let Some(bucket) = color_annotate_cell(value) {
                return format!("{}{}{}", bucket_code(bucket), padded, ANSI_RESET);
            }
        }
        padded
    }

    fn paint_line(&self, line: &SourceLine) -> String {
        if !self.color {
            return line.text.clone();
        }
        let mut out = String::with_capacity(line.text.len() * 2);
        let mut cursor = 0;
        for paint in &line.paints {
            out.push_str(&line.text[cursor..paint.start]);
            out.push_str(paint_code(paint.style));
            out.push_str(&line.text[paint.start..paint.end]);
            out.push_str(ANSI_RESET);
            cursor = paint.end;
        }
        out.push_str(&line.text[cursor..]);
        out
    }
}

impl Formatter for TextFormatter {
    fn summary(&self, table: &SummaryTable) -> String {
        let mut out = String::new();
        writeln!(out, "{}", table.title).unwrap();
        if !table.category_summary.is_empty() {
            writeln!(out, "{}", table.category_summary).unwrap();
        }
        out.push('\n');

        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let pad = widths[i].saturating_sub(column.chars().count());
                if i == 0 {
                    format!("{}{}", column, " ".repeat(pad))
                } else {
                    format!("{}{}", " ".repeat(pad), column)
                }
            })
            .collect();
        let header = header.join("  ");
        writeln!(out, "{}", header.trim_end()).unwrap();
        writeln!(out, "{}", "-".repeat(header.trim_end().chars().count())).unwrap();

        for row in &table.rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let value = row.get(i).map(String::as_str).unwrap_or("");
                    self.cell(value, *width, i != 0)
                })
                .collect();
            writeln!(out, "{}", cells.join("  ").trim_end()).unwrap();
        }

        out
    }

    fn source(&self, view: &SourceView) -> String {
        let mut out = String::new();
        writeln!(out, "{}", view.filename).unwrap();
        out.push('\n');
        for line in &view.lines {
            writeln!(out, "{}", self.paint_line(line)).unwrap();
        }
        out
    }
}

/// Emits the abstract instruction sets verbatim as pretty-printed JSON.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn summary(&self, table: &SummaryTable) -> String {
        serde_json::to_string_pretty(table).expect("summary table serialization cannot fail")
    }

    fn source(&self, view: &SourceView) -> String {
        serde_json::to_string_pretty(view).expect("source view serialization cannot fail")
    }
}
