//! Label/value extraction from registry result pages.
//!
//! The registry's markup isn't under our control, so a label is looked up
//! three ways, in order, and the first non-empty hit wins. Nothing in here
//! fails: a missing label is just an empty string.

use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};

/// Value shown next to `label`, or `""` when no strategy finds it.
pub fn find_after_label(label: &str, document: &Html) -> String {
    let text = document_text(document);

    from_definition_list(label, document)
        .or_else(|| from_inline_text(label, &text))
        .or_else(|| from_following_line(label, &text))
        .unwrap_or_default()
}

/// First label in `labels` that yields a value.
pub fn find_first(labels: &[&str], document: &Html) -> String {
    labels
        .iter()
        .map(|label| find_after_label(label, document))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// `<dt>label</dt><dd>value</dd>`; the term is compared trimmed and
/// case-insensitively, the definition has its whitespace collapsed.
pub fn from_definition_list(label: &str, document: &Html) -> Option<String> {
    let dt = Selector::parse("dt").ok()?;
    let wanted = label.trim().to_lowercase();

    document
        .select(&dt)
        .filter(|term| element_text(term).trim().to_lowercase() == wanted)
        .filter_map(|term| {
            term.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "dd")
        })
        .map(|dd| collapse_whitespace(&element_text(&dd)))
        .find(|value| !value.is_empty())
}

/// `label: value` (colon optional) with the value running to end of line.
pub fn from_inline_text(label: &str, text: &str) -> Option<String> {
    let pattern = format!(r"{}\s*:?\s*([^\n\r]+)", regex::escape(label));
    capture_first(&pattern, text)
}

/// Label on its own line, value on the next.
pub fn from_following_line(label: &str, text: &str) -> Option<String> {
    let pattern = format!(r"{}\s*\n\s*([^\n\r]+)", regex::escape(label));
    capture_first(&pattern, text)
}

/// Every text node in the document, concatenated.
pub fn document_text(document: &Html) -> String {
    element_text(&document.root_element())
}

fn capture_first(pattern: &str, text: &str) -> Option<String> {
    let re: Regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()?;

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
