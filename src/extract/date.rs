//! Publication instant resolution.
//!
//! Rungs, first hit wins:
//! 1. `article:published_time` metadata (ISO-8601, `Z` tolerated)
//! 2. date-bearing elements (`time[datetime]`, `span.date`, ...)
//! 3. a date anywhere in the visible text
//! 4. a date in the URL path
//!
//! Every instant is returned at the fixed +08:00 offset. Dates without a
//! time of day resolve to local midnight.

use super::{full_text, meta_content, selector, stripped_text};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// One step of the date fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRung {
    PublishedTimeMeta,
    DateSelectors,
    VisibleText,
    UrlPath,
}

pub const DATE_CHAIN: &[DateRung] = &[
    DateRung::PublishedTimeMeta,
    DateRung::DateSelectors,
    DateRung::VisibleText,
    DateRung::UrlPath,
];

const DATE_SELECTORS: &[&str] = &[
    "time[datetime]",
    "meta[itemprop='datePublished']",
    "span.time",
    "span.date",
    "div.date",
    "p.date",
];

static DATE_NODES: Lazy<Vec<Selector>> =
    Lazy::new(|| DATE_SELECTORS.iter().map(|css| selector(css)).collect());

/// `YYYY` sep `M[M]` sep `D[D]`, separators `-` `/` `.` or 年/月.
static DATE_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(20[0-9]{2})[-/年.]([0-9]{1,2})[-/月.]([0-9]{1,2})").expect("valid date regex")
});

/// Resolve the publication instant of a page.
pub fn resolve_date(document: &Html, url: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DATE_CHAIN
        .iter()
        .find_map(|rung| date_from(document, url, *rung, offset))
}

/// Apply a single date rung.
pub fn date_from(
    document: &Html,
    url: &str,
    rung: DateRung,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    match rung {
        DateRung::PublishedTimeMeta => meta_content(document, "property", "article:published_time")
            .or_else(|| meta_content(document, "name", "article:published_time"))
            .and_then(|content| parse_iso_instant(&content, offset)),
        DateRung::DateSelectors => DATE_NODES.iter().find_map(|sel| {
            let node = document.select(sel).next()?;
            let value = node.value();
            let text = value
                .attr("datetime")
                .or_else(|| value.attr("content"))
                .map(str::to_string)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| stripped_text(node, " "));
            parse_any_date(&text, offset)
        }),
        DateRung::VisibleText => parse_any_date(&full_text(document), offset),
        DateRung::UrlPath => parse_date_pattern(url, offset),
    }
}

/// Parse an ISO-8601-like timestamp, else fall back to the date pattern.
pub fn parse_any_date(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.contains('T') {
        if let Some(dt) = parse_iso_instant(s, offset) {
            return Some(dt);
        }
    }
    parse_date_pattern(s, offset)
}

/// Parse a full ISO-8601 timestamp and convert it to `offset`.
///
/// A trailing `Z` is UTC; a timestamp without any offset is taken to be
/// already in `offset`.
pub fn parse_iso_instant(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&offset));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&offset));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return offset.from_local_datetime(&naive).single();
        }
    }
    None
}

/// Find the first `YYYY-M-D` style date in `s` and return its midnight.
///
/// Only the first match is considered; an impossible calendar date there
/// yields `None`.
pub fn parse_date_pattern(s: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let caps = DATE_PAT.captures(s)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    offset.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}
