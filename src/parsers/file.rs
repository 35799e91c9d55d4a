//! Parser for the per-file report page.
//!
//! The page body is a three-column table: line numbers, one coverage
//! indicator span per source line, and the source itself in a single
//! `<pre>` block with uncovered fragments wrapped in decoration spans:
//!
//!   <td class="line-count">1\n2\n...</td>
//!   <td class="line-coverage">
//!     <span class="cline-any cline-yes">6×</span>
//!     <span class="cline-any cline-no">&nbsp;</span>
//!     ...
//!   </td>
//!   <td class="text"><pre class="prettyprint">...source...</pre></td>
//!
//! The code block is extracted twice (full and display modes, see
//! [`crate::dom`]) and the per-line diff of the two variants locates the
//! uncovered span. The annotation stream decides *whether* a line is
//! uncovered; the text diff only locates *where*.

use scraper::{ElementRef, Html};

use super::page_title;
use crate::dom;
use crate::error::{CovviewError, Result};
use crate::highlight;
use crate::model::{CoverageClass, FileCoverageLine, LineAnnotation};

/// A fully reconstructed per-file report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub filename: String,
    pub lines: Vec<FileCoverageLine>,
}

/// Extract per-line coverage and reconstructed source text from a
/// per-file report page.
pub fn parse_file(doc: &Html) -> Result<FileReport> {
    let filename = page_title(doc)?;
    let root = doc.root_element();

    let cells = dom::all_by_tag(root, "td");
    if cells.len() < 3 {
        return Err(CovviewError::MalformedReport(format!(
            "file report body has {} cells, expected at least 3",
            cells.len()
        )));
    }

    let annotations = parse_annotations(cells[1]);

    let code = dom::first_by_tag(cells[2], "pre").ok_or_else(|| {
        CovviewError::MalformedReport("file report has no code block".into())
    })?;

    let full = dom::full_text(code);
    let display = dom::display_text(code);
    let mut full_lines: Vec<&str> = full.split('\n').collect();
    let mut display_lines: Vec<&str> = display.split('\n').collect();

    // The layout produces one synthetic blank line after the final newline.
    if full_lines.last() == Some(&"") {
        full_lines.pop();
    }
    if display_lines.last() == Some(&"") {
        display_lines.pop();
    }

    // The per-line zip below is positional; a count mismatch beyond the
    // trailing blank would silently corrupt every subsequent paint range.
    if full_lines.len().abs_diff(display_lines.len()) > 1 {
        return Err(CovviewError::MalformedReport(format!(
            "code block line counts disagree: {} full vs {} display",
            full_lines.len(),
            display_lines.len()
        )));
    }

    let mut lines = Vec::with_capacity(full_lines.len());
    for (index, full_line) in full_lines.iter().enumerate() {
        let display_line = display_lines.get(index).copied().unwrap_or("");
        let annotation = annotations
            .get(index)
            .cloned()
            .unwrap_or_else(LineAnnotation::unknown);

        // Only an explicitly uncovered line participates in span
        // reconstruction.
        let uncovered = if annotation.class == CoverageClass::Uncovered {
            highlight::uncovered_span(full_line, display_line)?
        } else {
            None
        };

        lines.push(FileCoverageLine {
            line_number: index as u32 + 1,
            text: full_line.trim_end().to_string(),
            annotation,
            uncovered,
        });
    }

    Ok(FileReport { filename, lines })
}

/// Read the indicator spans of the annotation column. NBSP padding is
/// stripped from the indicator text.
fn parse_annotations(cell: ElementRef<'_>) -> Vec<LineAnnotation> {
    dom::all_by_tag(cell, "span")
        .into_iter()
        .map(|span| LineAnnotation {
            class: dom::attr(span, "class")
                .map(CoverageClass::from_class_attr)
                .unwrap_or(CoverageClass::Unknown),
            text: dom::text(span).replace('\u{a0}', ""),
        })
        .collect()
}
