// Shared fixtures for the integration tests. Not every test binary uses
// every item.
#![allow(dead_code)]

use std::path::Path;

/// Root summary page of the fixture report.
pub const SUMMARY_PAGE: &str = include_str!("../fixtures/index.html");

/// Per-file page of the fixture report.
pub const FILE_PAGE: &str = include_str!("../fixtures/util.js.html");

/// Directory summary page of the fixture report.
pub const DIR_PAGE: &str = include_str!("../fixtures/src_index.html");

/// Write the fixture report into `dir`, mirroring the on-disk layout the
/// HTML reporter produces.
pub fn write_report_tree(dir: &Path) {
    std::fs::write(dir.join("index.html"), SUMMARY_PAGE).unwrap();
    std::fs::write(dir.join("util.js.html"), FILE_PAGE).unwrap();
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/index.html"), DIR_PAGE).unwrap();
}
