//! Parser for the summary report page.
//!
//! The page shape, as emitted by Istanbul's HTML reporter:
//!
//!   <h1>All files</h1>                        (or "All files / <dir>")
//!   <div class="fl pad1y space-right2">       (one per category)
//!     <span class="strong">80% </span>
//!     <span class="quiet">Statements</span>
//!     <span class="fraction">40/50</span>
//!   </div>
//!   <table class="coverage-summary">
//!     <tbody><tr>
//!       <td class="file"><a href="src/util/index.html">src/util</a></td>
//!       <td class="pic">...</td>              (bar chart, skipped)
//!       <td class="pct">80%</td>
//!       <td class="abs">40/50</td>
//!       ...                                   (branches, functions, lines)
//!     </tr></tbody>
//!   </table>

use scraper::{ElementRef, Html};

use super::{page_title, SUMMARY_MARKER_CLASS};
use crate::dom;
use crate::error::{CovviewError, Result};
use crate::model::{ReportMeta, SummaryRow};

/// Extract the report meta and one row per listed file/directory from a
/// summary page.
pub fn parse_summary(doc: &Html) -> Result<(ReportMeta, Vec<SummaryRow>)> {
    let title = page_title(doc)?;
    let root = doc.root_element();

    let meta = ReportMeta {
        title,
        category_summary: category_summary(root),
    };

    let table = dom::all_by_class(root, SUMMARY_MARKER_CLASS)
        .into_iter()
        .next()
        .ok_or_else(|| CovviewError::MalformedReport("summary page has no results table".into()))?;
    let body = dom::first_by_tag(table, "tbody").ok_or_else(|| {
        CovviewError::MalformedReport("summary results table has no body".into())
    })?;

    let mut rows = Vec::new();
    for row in dom::all_by_tag(body, "tr") {
        rows.push(parse_row(row)?);
    }

    Ok((meta, rows))
}

/// Join the secondary category stats ("80% Statements (40/50), ...").
/// Entries missing their three label spans are skipped.
fn category_summary(root: ElementRef<'_>) -> String {
    let mut categories = Vec::new();
    for entry in dom::all_by_class(root, "space-right2") {
        let spans = dom::all_by_tag(entry, "span");
        if let [value, label, fraction, ..] = spans.as_slice() {
            categories.push(format!(
                "{} {} ({})",
                dom::text(*value),
                dom::text(*label),
                dom::text(*fraction)
            ));
        }
    }
    categories.join(", ")
}

fn parse_row(row: ElementRef<'_>) -> Result<SummaryRow> {
    let cells = dom::all_by_tag(row, "td");
    if cells.len() < 3 {
        return Err(CovviewError::MalformedReport(format!(
            "summary row has {} cells, expected at least 3",
            cells.len()
        )));
    }

    let link = dom::first_by_tag(cells[0], "a")
        .ok_or_else(|| CovviewError::MalformedReport("summary row has no link".into()))?;
    let target = dom::attr(link, "href")
        .ok_or_else(|| CovviewError::MalformedReport("summary row link has no target".into()))?;

    // The first two cells are the identifier and the bar chart; the rest
    // are the stat columns, preserved verbatim in original order.
    let stats = cells[2..].iter().map(|cell| dom::text(*cell)).collect();

    Ok(SummaryRow {
        identifier: identifier_from_target(target),
        stats,
    })
}

/// Derive a row identifier from its link target. Directory links end in
/// `index.html`; file links end in `.html`.
fn identifier_from_target(target: &str) -> String {
    if let Some(dir) = target.strip_suffix("index.html") {
        dir.to_string()
    } else if let Some(file) = target.strip_suffix(".html") {
        file.to_string()
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SummaryRow;

    const SUMMARY_PAGE: &str = r#"
        <html><body>
        <div class="pad1">
          <h1>All files</h1>
          <div class="clearfix">
            <div class="fl pad1y space-right2">
              <span class="strong">80% </span>
              <span class="quiet">Statements</span>
              <span class="fraction">4/5</span>
            </div>
            <div class="fl pad1y space-right2">
              <span class="strong">70% </span>
              <span class="quiet">Branches</span>
              <span class="fraction">7/10</span>
            </div>
          </div>
        </div>
        <div class="pad1">
          <table class="coverage-summary">
            <thead><tr>
              <th>File</th><th></th>
              <th>Statements</th><th></th>
              <th>Branches</th><th></th>
            </tr></thead>
            <tbody>
              <tr>
                <td class="file high"><a href="src/util.html">src/util</a></td>
                <td class="pic high"><div class="chart"></div></td>
                <td class="pct high">80%</td>
                <td class="abs high">4/5</td>
                <td class="pct medium">70%</td>
                <td class="abs medium">7/10</td>
              </tr>
            </tbody>
          </table>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_summary_meta() {
        let doc = Html::parse_document(SUMMARY_PAGE);
        let (meta, _) = parse_summary(&doc).unwrap();

        assert_eq!(meta.title, "All files");
        assert_eq!(
            meta.category_summary,
            "80% Statements (4/5), 70% Branches (7/10)"
        );
    }

    #[test]
    fn test_parse_summary_rows() {
        let doc = Html::parse_document(SUMMARY_PAGE);
        let (_, rows) = parse_summary(&doc).unwrap();

        assert_eq!(
            rows,
            vec![SummaryRow {
                identifier: "src/util".to_string(),
                stats: vec![
                    "80%".to_string(),
                    "4/5".to_string(),
                    "70%".to_string(),
                    "7/10".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_identifier_strips_directory_index() {
        assert_eq!(identifier_from_target("src/util/index.html"), "src/util/");
        assert_eq!(identifier_from_target("index.html"), "");
    }

    #[test]
    fn test_identifier_strips_file_extension() {
        assert_eq!(identifier_from_target("src/util.html"), "src/util");
        assert_eq!(identifier_from_target("app.js.html"), "app.js");
    }

    #[test]
    fn test_identifier_passthrough() {
        assert_eq!(identifier_from_target("weird-target"), "weird-target");
    }

    #[test]
    fn test_parse_summary_missing_heading() {
        let doc = Html::parse_document(
            "<body><table class='coverage-summary'><tbody></tbody></table></body>",
        );
        assert!(matches!(
            parse_summary(&doc),
            Err(CovviewError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_parse_summary_missing_table() {
        let doc = Html::parse_document("<body><h1>All files</h1></body>");
        assert!(matches!(
            parse_summary(&doc),
            Err(CovviewError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_parse_summary_row_without_link() {
        let doc = Html::parse_document(
            "<body><h1>All files</h1><table class='coverage-summary'><tbody>\
             <tr><td>src/util</td><td></td><td>80%</td></tr>\
             </tbody></table></body>",
        );
        assert!(matches!(
            parse_summary(&doc),
            Err(CovviewError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_parse_summary_empty_body() {
        let doc = Html::parse_document(
            "<body><h1>All files</h1><table class='coverage-summary'><tbody></tbody></table></body>",
        );
        let (_, rows) = parse_summary(&doc).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_directory_page_title() {
        let page = SUMMARY_PAGE.replace(
            "<h1>All files</h1>",
            "<h1><a href=\"../index.html\">All files</a> / src/util</h1>",
        );
        let doc = Html::parse_document(&page);
        let (meta, _) = parse_summary(&doc).unwrap();
        assert_eq!(meta.title, "All files src/util/");
    }
}
