//! Heuristic extraction of structured fields from a parsed article page.
//!
//! # Submodules
//!
//! - [`content`]: title and description fallback chains
//! - [`date`]: publication instant from metadata, markup, text or URL
//! - [`tags`]: betting-tip labels and the injury/lineup signal
//! - [`summary`]: 2–3 sentence Cantonese summary assembly
//!
//! Every fallback chain is an ordered slice of rungs so each rung can be
//! exercised on its own in tests.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

pub mod content;
pub mod date;
pub mod summary;
pub mod tags;

/// Placeholder description used when a page yields nothing usable.
///
/// Compared by value downstream; never rendered as if it were article text.
pub const NO_SUMMARY: &str = "（未能擷取摘要）";

/// Parse a selector literal that is known to be valid.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

static META_WITH_CONTENT: Lazy<Selector> = Lazy::new(|| selector("meta[content]"));

/// Text nodes under `el`, each trimmed, empties dropped, joined by `sep`.
pub fn stripped_text(el: ElementRef<'_>, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// All visible text of the document, space separated.
pub fn full_text(document: &Html) -> String {
    stripped_text(document.root_element(), " ")
}

/// Trimmed `content` of the first `<meta>` whose `attr` equals `value`.
///
/// Returns `None` when no such tag exists or its content is blank.
pub fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    document
        .select(&META_WITH_CONTENT)
        .find(|el| el.value().attr(attr) == Some(value))
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
