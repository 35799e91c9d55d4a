//! Command handler functions for the covview CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them
//! easy to test without capturing stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scraper::Html;

use crate::parsers::{self, ReportKind};
use crate::render::{self, Formatter, JsonFormatter, TextFormatter};

/// Pick the output formatter from the CLI flags.
#[must_use]
pub fn formatter(json: bool, color: bool) -> Box<dyn Formatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter { color })
    }
}

/// Render one report page, routing on its classification.
pub fn cmd_view(source: &str, formatter: &dyn Formatter) -> Result<String> {
    let doc = Html::parse_document(source);
    match parsers::classify(&doc) {
        ReportKind::Summary => {
            let (meta, rows) = parsers::summary::parse_summary(&doc)?;
            let table = render::build_summary_table(&meta, &rows)?;
            Ok(formatter.summary(&table))
        }
        ReportKind::File => {
            let report = parsers::file::parse_file(&doc)?;
            let view = render::build_source_view(&report.filename, &report.lines);
            Ok(formatter.source(&view))
        }
    }
}

/// Resolve an identifier and render its report page.
pub fn cmd_show(root: &Path, identifier: &str, formatter: &dyn Formatter) -> Result<String> {
    let path = report_path(root, identifier);
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read report page {}", path.display()))?;
    cmd_view(&source, formatter)
}

/// Map a summary-row identifier to its report page path: the empty
/// identifier and `/`-suffixed directories resolve to their
/// `index.html`, everything else to `<identifier>.html`.
#[must_use]
pub fn report_path(root: &Path, identifier: &str) -> PathBuf {
    if identifier.is_empty() {
        root.join("index.html")
    } else if identifier.ends_with('/') {
        root.join(identifier).join("index.html")
    } else {
        root.join(format!("{identifier}.html"))
    }
}
