//! Percentage formatting and small string utilities shared by the parsers
//! and renderers.

use crate::error::{CovviewError, Result};

/// Format a percentage value for display: `0` renders as `"0%"`, anything
/// else with up to 4 significant digits and a `%` suffix.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 {
        return "0%".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).max(0) as usize;
    let rendered = format!("{value:.decimals$}");
    let rendered = if decimals > 0 {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    format!("{rendered}%")
}

/// Render `covered` out of `total` as a percentage string. A zero operand
/// short-circuits to `"0%"` and equality to `"100%"` so float division
/// never produces `"99.99%"` for a fully covered category.
#[must_use]
pub fn percentage_of(covered: u64, total: u64) -> String {
    if covered == 0 || total == 0 {
        format_percentage(0.0)
    } else if covered == total {
        format_percentage(100.0)
    } else {
        format_percentage(100.0 * covered as f64 / total as f64)
    }
}

/// True iff the string's last character is `%`.
#[must_use]
pub fn is_percentage_string(s: &str) -> bool {
    s.ends_with('%')
}

/// Parse a percentage string back to its numeric value, stripping a
/// trailing `%` if present.
pub fn parse_percentage(s: &str) -> Result<f64> {
    let number = s.strip_suffix('%').unwrap_or(s);
    number
        .trim()
        .parse::<f64>()
        .map_err(|_| CovviewError::Format(format!("not a percentage: '{s}'")))
}

/// Center `s` in a field of `width` characters, splitting the padding as
/// evenly as possible (extra space goes to the right). Returns `s`
/// unchanged when it already fills the field.
#[must_use]
pub fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if width <= len {
        return s.to_string();
    }
    let deficit = width - len;
    let left = deficit / 2;
    let right = deficit - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}
