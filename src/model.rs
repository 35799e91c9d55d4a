//! In-memory representation of a parsed coverage report page. Every entity
//! here is a read-only projection of one parsed HTML document, recomputed
//! in full on every parse call.

use serde::Serialize;

/// One row of a summary report: a file or directory plus its stat cells
/// in original column order (percentage and covered/total pairs for
/// statements, branches, functions and lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Link-derived identifier; directories keep their trailing `/`.
    pub identifier: String,
    pub stats: Vec<String>,
}

/// Aggregate title and joined category stat line of a summary report,
/// e.g. `"80% Statements (40/50), 70% Branches (7/10)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub title: String,
    pub category_summary: String,
}

/// Coverage classification of a single source line, read from the
/// report's indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageClass {
    Covered,
    Uncovered,
    Unknown,
}

impl CoverageClass {
    /// Map an indicator span's `class` attribute to a coverage class.
    #[must_use]
    pub fn from_class_attr(attr: &str) -> Self {
        if attr.split_whitespace().any(|c| c == "cline-no") {
            CoverageClass::Uncovered
        } else if attr.split_whitespace().any(|c| c == "cline-yes") {
            CoverageClass::Covered
        } else {
            CoverageClass::Unknown
        }
    }
}

/// One indicator span from a per-file report's annotation column. Index
/// position corresponds 1:1 to the (1-based) source line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAnnotation {
    pub class: CoverageClass,
    /// Indicator text (hit count such as `"6×"`), NBSP characters stripped.
    pub text: String,
}

impl LineAnnotation {
    /// Placeholder used when the annotation column is shorter than the
    /// code column.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            class: CoverageClass::Unknown,
            text: String::new(),
        }
    }
}

/// A half-open byte range within one source line's text to be painted as
/// uncovered. Always lies on UTF-8 character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UncoveredSpan {
    pub start: usize,
    pub end: usize,
}

/// A fully reconstructed line of a per-file report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCoverageLine {
    pub line_number: u32,
    /// Markup-stripped source text, trailing whitespace trimmed.
    pub text: String,
    pub annotation: LineAnnotation,
    /// At most one contiguous uncovered range, matching the granularity
    /// of the source report.
    pub uncovered: Option<UncoveredSpan>,
}

/// Color classification for a percentage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorBucket {
    Green,
    Yellow,
    Red,
}

impl ColorBucket {
    /// Thresholds are inclusive on the lower bound: >= 80 is green,
    /// >= 60 is yellow, everything below is red.
    #[must_use]
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            ColorBucket::Green
        } else if pct >= 60.0 {
            ColorBucket::Yellow
        } else {
            ColorBucket::Red
        }
    }
}
