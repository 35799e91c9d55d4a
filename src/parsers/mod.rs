//! Parsers for the two report page shapes, plus page classification.
//!
//! A coverage report is a pair of page kinds: a summary page listing
//! aggregate stats per file/directory, and a per-file page showing
//! annotated source. Classification keys off the summary results table's
//! marker class.

pub mod file;
pub mod summary;

use scraper::Html;

use crate::dom;
use crate::error::{CovviewError, Result};

/// Marker class carried by the summary page's results table.
pub const SUMMARY_MARKER_CLASS: &str = "coverage-summary";

/// The two page shapes a report document can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    File,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::File => "file",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a report page by the presence of the summary marker element.
#[must_use]
pub fn classify(doc: &Html) -> ReportKind {
    if has_summary_marker(doc) {
        ReportKind::Summary
    } else {
        ReportKind::File
    }
}

fn has_summary_marker(doc: &Html) -> bool {
    !dom::all_by_class(doc.root_element(), SUMMARY_MARKER_CLASS).is_empty()
}

/// Title of a report page: the top-level heading's text, whitespace-joined
/// with standalone `/` tokens dropped. Summary pages other than the root
/// get a trailing `/` (the directory display convention); per-file pages
/// use the joined text as-is.
pub(crate) fn page_title(doc: &Html) -> Result<String> {
    let heading = dom::first_by_tag(doc.root_element(), "h1")
        .ok_or_else(|| CovviewError::MalformedReport("report page has no heading".into()))?;

    let joined = dom::text(heading)
        .split_whitespace()
        .filter(|token| *token != "/")
        .collect::<Vec<_>>()
        .join(" ");

    if joined == "All files" {
        Ok(joined)
    } else if has_summary_marker(doc) {
        Ok(format!("{joined}/"))
    } else {
        Ok(joined)
    }
}
