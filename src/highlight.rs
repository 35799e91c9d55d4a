//! Reconstruction of uncovered character spans from the two text
//! extraction modes of a report's code block.
//!
//! The report wraps each uncovered fragment in an inline decoration
//! element. The full extraction mode includes the decoration's text (plus
//! one incidental separator character per boundary); the display mode
//! skips it entirely. The two strings therefore share a common prefix and
//! suffix around any divergence, and the divergence itself locates the
//! uncovered fragment without parsing the decoration markup. Four shapes
//! are distinguished: no span, whole line, trailing, and interior.
//!
//! All offsets are byte offsets computed from character-wise scans, so a
//! span never splits a UTF-8 sequence.

use crate::error::{CovviewError, Result};
use crate::model::UncoveredSpan;

/// Locate the uncovered span of one source line given its two text
/// variants. Returns `None` when the line has no uncovered fragment, or
/// when the corrected span collapses to nothing.
///
/// Fails with [`CovviewError::MalformedReport`] if `full` is shorter than
/// `display` — the extraction contract makes that impossible for a
/// well-formed report, and a negative-length span must never be emitted.
pub fn uncovered_span(full: &str, display: &str) -> Result<Option<UncoveredSpan>> {
    if full.len() < display.len() {
        return Err(CovviewError::MalformedReport(format!(
            "full text shorter than display text: {} < {} bytes",
            full.len(),
            display.len()
        )));
    }

    if full == display {
        return Ok(None);
    }

    let trimmed_len = full.trim_end().len();

    // Nothing visible at all: the whole line is uncovered.
    if display.trim().is_empty() {
        return span(0, trimmed_len, trimmed_len);
    }

    match deviation_start(full, display) {
        // Display is a proper prefix: the uncovered fragment is a trailing
        // suffix. The character before the divergence is the incidental
        // separator, absorbed into the span.
        None => {
            if full[display.len()..].trim().is_empty() {
                // Pure-whitespace divergence is an extraction artifact,
                // not a coverage signal.
                return Ok(None);
            }
            span_checked(display.len().saturating_sub(1), trimmed_len, trimmed_len)
        }
        // Interior divergence: bracket it from both ends, then absorb the
        // one separator character on each side.
        Some(start) => {
            let from_end = deviation_from_end(full.trim_end(), display.trim_end());
            let end = trimmed_len.saturating_sub(from_end);
            if end <= start || full[start..end].trim().is_empty() {
                return Ok(None);
            }
            span_checked(start.saturating_sub(1), (end + 1).min(trimmed_len), trimmed_len)
        }
    }
}

fn span_checked(start: usize, end: usize, limit: usize) -> Result<Option<UncoveredSpan>> {
    span(start.min(limit), end.min(limit), limit)
}

fn span(start: usize, end: usize, limit: usize) -> Result<Option<UncoveredSpan>> {
    debug_assert!(start <= limit && end <= limit);
    if start >= end {
        return Ok(None);
    }
    Ok(Some(UncoveredSpan { start, end }))
}

/// Byte offset of the first character at which the two strings differ, or
/// `None` when `display` is a prefix of `full`.
fn deviation_start(full: &str, display: &str) -> Option<usize> {
    let mut display_chars = display.chars();
    for (idx, full_char) in full.char_indices() {
        match display_chars.next() {
            Some(display_char) if display_char == full_char => continue,
            Some(_) => return Some(idx),
            None => return None,
        }
    }
    None
}

/// Length in bytes of the common suffix of the two strings, i.e. the
/// offset from the back of the first character at which the reversed
/// strings differ.
fn deviation_from_end(full: &str, display: &str) -> usize {
    let mut matched = 0;
    let mut display_chars = display.chars().rev();
    for full_char in full.chars().rev() {
        match display_chars.next() {
            Some(display_char) if display_char == full_char => {
                matched += full_char.len_utf8();
            }
            _ => break,
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(full: &str, display: &str) -> Option<UncoveredSpan> {
        uncovered_span(full, display).unwrap()
    }

    #[test]
    fn test_identical_texts_have_no_span() {
        assert_eq!(reconstruct("foo();", "foo();"), None);
        assert_eq!(reconstruct("", ""), None);
        assert_eq!(reconstruct("  indented", "  indented"), None);
    }

    #[test]
    fn test_whole_line_uncovered() {
        let span = reconstruct("foo();", "   ").unwrap();
        assert_eq!((span.start, span.end), (0, 6));
    }

    #[test]
    fn test_whole_line_uncovered_empty_display() {
        let span = reconstruct("bar();", "").unwrap();
        assert_eq!((span.start, span.end), (0, 6));
    }

    #[test]
    fn test_whole_line_span_excludes_trailing_whitespace() {
        let span = reconstruct("foo();   ", " ").unwrap();
        assert_eq!((span.start, span.end), (0, 6));
    }

    #[test]
    fn test_trailing_suffix_uncovered() {
        // The span starts one character before the end of the display
        // text, absorbing the incidental separator.
        let span = reconstruct("if (x) return;", "if (x) ").unwrap();
        assert_eq!((span.start, span.end), (6, 14));
    }

    #[test]
    fn test_trailing_suffix_with_extraction_artifacts() {
        // As produced by the extractors: one joined separator before the
        // fragment, one trailing separator before the line break.
        let full = "if (x)  return; ";
        let display = "if (x)  ";
        let span = reconstruct(full, display).unwrap();
        assert_eq!((span.start, span.end), (7, 15));
        assert_eq!(&full[span.start..span.end], " return;");
    }

    #[test]
    fn test_trailing_suffix_of_only_whitespace_is_no_span() {
        assert_eq!(reconstruct("ab   ", "ab "), None);
    }

    #[test]
    fn test_interior_whitespace_divergence_is_no_span() {
        // An empty decoration contributes only join separators
        assert_eq!(reconstruct("a  b", "a b"), None);
    }

    #[test]
    fn test_interior_deviation_brackets_removed_fragment() {
        assert_eq!(deviation_start("a(b, c);", "a(, c);"), Some(2));
        assert_eq!(deviation_from_end("a(b, c);", "a(, c);"), 5);
        // start and trimmed-length minus suffix bracket exactly "b"
        assert_eq!(&"a(b, c);"[2..8 - 5], "b");
    }

    #[test]
    fn test_interior_span_with_extraction_artifacts() {
        // full carries the fragment plus one separator on each side
        let full = "a( b , c);";
        let display = "a( , c);";
        let span = reconstruct(full, display).unwrap();
        assert_eq!((span.start, span.end), (2, 5));
        assert_eq!(&full[span.start..span.end], " b ");
    }

    #[test]
    fn test_interior_span_at_line_start() {
        let full = " x y();";
        let display = " y();";
        let span = reconstruct(full, display).unwrap();
        assert_eq!(&full[span.start..span.end], " x ");
    }

    #[test]
    fn test_full_shorter_than_display_is_malformed() {
        let err = uncovered_span("ab", "abc").unwrap_err();
        assert!(matches!(err, CovviewError::MalformedReport(_)));
    }

    #[test]
    fn test_offsets_respect_char_boundaries() {
        let full = "x ×y z";
        let display = "x z";
        let span = reconstruct(full, display).unwrap();
        // Slicing at the computed offsets must not panic
        let _ = &full[span.start..span.end];
        assert!(full.is_char_boundary(span.start));
        assert!(full.is_char_boundary(span.end));
    }

    #[test]
    fn test_trailing_multibyte_fragment() {
        let full = "x ×y";
        let display = "x ";
        let span = reconstruct(full, display).unwrap();
        assert_eq!((span.start, span.end), (1, 5));
        assert_eq!(&full[span.start..span.end], " ×y");
    }
}
