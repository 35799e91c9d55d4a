//! Generic queries over a parsed HTML tree, plus the two text-extraction
//! modes the highlight reconstruction depends on.
//!
//! All functions here are pure and total: a missing match yields `None` or
//! an empty collection, never an error. The tree is supplied by the caller
//! (any standards-conformant parser; we use `scraper`) and is never
//! mutated.

use scraper::ElementRef;

/// First descendant element with the given tag name, depth-first.
#[must_use]
pub fn first_by_tag<'a>(root: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// All descendant elements with the given tag name, in document order.
#[must_use]
pub fn all_by_tag<'a>(root: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == tag)
        .collect()
}

/// All descendant elements carrying `class` as one of their class tokens.
#[must_use]
pub fn all_by_class<'a>(root: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| has_class(*el, class))
        .collect()
}

/// Attribute value of an element, if present.
#[must_use]
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Whether the element's `class` attribute contains the given token.
#[must_use]
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value()
        .attr("class")
        .map(|attr| attr.split_whitespace().any(|token| token == class))
        .unwrap_or(false)
}

/// Visible text of an element: every descendant text node, runs of
/// whitespace collapsed to single spaces, outer whitespace trimmed.
#[must_use]
pub fn text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Full extraction mode: the text of every child, elements recursively,
/// joined with a single space at each node boundary.
///
/// The join is what makes the two modes comparable: wherever the report
/// wraps a code fragment in a decoration element, this mode contributes
/// the fragment's text plus one separator character per boundary, while
/// [`display_text`] contributes neither.
#[must_use]
pub fn full_text(el: ElementRef<'_>) -> String {
    child_pieces(el, true).join(" ")
}

/// Display extraction mode: direct text-node children only, joined with a
/// single space. Text inside decoration elements does not contribute.
#[must_use]
pub fn display_text(el: ElementRef<'_>) -> String {
    child_pieces(el, false).join(" ")
}

/// Collect one text piece per child node: text nodes verbatim, element
/// children either recursively (`descend`) or not at all. Other node
/// kinds (comments, processing instructions) contribute nothing.
fn child_pieces(el: ElementRef<'_>, descend: bool) -> Vec<String> {
    let mut pieces = Vec::new();
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            pieces.push(text.to_string());
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if descend {
                pieces.push(full_text(child_el));
            }
        }
    }
    pieces
}
