//! Title and description extraction.
//!
//! Title rungs are tried in order and the first non-empty result wins; the
//! page URL closes every chain so a title is never empty. on.cc pages get
//! the long chain because their social metadata is frequently missing.

use super::{NO_SUMMARY, meta_content, selector, stripped_text};
use crate::models::SourceId;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// One step of the title fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRung {
    /// `<meta property="og:title">`
    SocialPreview,
    /// First `<h1>`
    Heading,
    /// Known title-bearing class names, then attribute-substring matches
    KnownSelectors,
    /// `<title>`
    DocumentTitle,
}

/// One step of the description fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionRung {
    /// `<meta name="description">`
    MetaDescription,
    /// First `<p>`, whitespace collapsed
    FirstParagraph,
}

const FULL_TITLE_CHAIN: &[TitleRung] = &[
    TitleRung::SocialPreview,
    TitleRung::Heading,
    TitleRung::KnownSelectors,
    TitleRung::DocumentTitle,
];

const SHORT_TITLE_CHAIN: &[TitleRung] = &[TitleRung::SocialPreview, TitleRung::DocumentTitle];

const DESCRIPTION_CHAIN: &[DescriptionRung] =
    &[DescriptionRung::MetaDescription, DescriptionRung::FirstParagraph];

/// Exact class names first, substring matches last.
const TITLE_SELECTORS: &[&str] = &[
    ".articleTitle",
    ".artTitle",
    ".newsTitle",
    ".title",
    "[class*='title']",
    "[id*='title']",
];

static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static P: Lazy<Selector> = Lazy::new(|| selector("p"));
static KNOWN_TITLES: Lazy<Vec<Selector>> =
    Lazy::new(|| TITLE_SELECTORS.iter().map(|css| selector(css)).collect());

/// Title rungs used for a source.
pub fn title_chain(source: Option<SourceId>) -> &'static [TitleRung] {
    match source {
        Some(SourceId::Oncc) => FULL_TITLE_CHAIN,
        _ => SHORT_TITLE_CHAIN,
    }
}

/// Extract `(title, description)`; the description may be [`NO_SUMMARY`].
pub fn extract_title_and_description(
    document: &Html,
    source: Option<SourceId>,
    url: &str,
) -> (String, String) {
    let title = title_chain(source)
        .iter()
        .find_map(|rung| title_from(document, *rung))
        .unwrap_or_else(|| url.to_string());

    let description = DESCRIPTION_CHAIN
        .iter()
        .find_map(|rung| description_from(document, *rung))
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    (title, description)
}

/// Apply a single title rung.
pub fn title_from(document: &Html, rung: TitleRung) -> Option<String> {
    let found = match rung {
        TitleRung::SocialPreview => meta_content(document, "property", "og:title"),
        TitleRung::Heading => document.select(&H1).next().map(|h1| stripped_text(h1, "")),
        TitleRung::KnownSelectors => KNOWN_TITLES.iter().find_map(|sel| {
            document
                .select(sel)
                .next()
                .map(|node| stripped_text(node, " "))
                .filter(|t| !t.is_empty())
        }),
        TitleRung::DocumentTitle => document
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string()),
    };
    found.filter(|t| !t.is_empty())
}

/// Apply a single description rung.
pub fn description_from(document: &Html, rung: DescriptionRung) -> Option<String> {
    let found = match rung {
        DescriptionRung::MetaDescription => meta_content(document, "name", "description"),
        DescriptionRung::FirstParagraph => document
            .select(&P)
            .next()
            .map(|p| collapse_whitespace(&stripped_text(p, " "))),
    };
    found.filter(|d| !d.is_empty())
}
