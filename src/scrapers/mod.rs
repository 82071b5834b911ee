//! Transport and candidate discovery for the three football columns.
//!
//! # Supported Sources
//!
//! | Source | Module | Discovery |
//! |--------|--------|-----------|
//! | 星島《波盤王》 | [`stheadline`] | listing page anchors under `/football-betting/` |
//! | am730《波經》 | [`am730`] | listing page anchors under `/體育/` |
//! | 東網《足球快訊》 | [`oncc`] | date-templated article slots |
//!
//! Fetching goes through the [`PageFetcher`] trait so the pipeline can be
//! driven by an in-memory fetcher in tests. [`HttpFetcher`] is the
//! production implementation on top of `reqwest`.

use crate::config::ScrapeConfig;
use crate::extract::{selector, stripped_text};
use crate::models::{RawBytes, SourceId};
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

pub mod am730;
pub mod oncc;
pub mod stheadline;

static ANCHORS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
}

/// Anything that can turn a URL into response bytes.
pub trait PageFetcher {
    /// Fetch `url`, giving up after `timeout`.
    ///
    /// Non-success statuses are errors.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<RawBytes, FetchError>;
}

/// How candidate article URLs are found for a source.
#[derive(Debug, Clone, Copy)]
pub enum Discovery {
    /// Scrape a listing page and keep anchors accepted by `keep`.
    Listing { url: &'static str, keep: fn(&str) -> bool },
    /// Synthesize URLs from the target date.
    DateTemplate,
}

/// Discovery strategy of a source.
pub fn discovery(source: SourceId) -> Discovery {
    match source {
        SourceId::StHeadline => Discovery::Listing {
            url: stheadline::LISTING_URL,
            keep: stheadline::is_article_link,
        },
        SourceId::Am730 => Discovery::Listing {
            url: am730::LISTING_URL,
            keep: am730::is_article_link,
        },
        SourceId::Oncc => Discovery::DateTemplate,
    }
}

/// Article links of a listing page, resolved against `base`.
///
/// Anchors without text are ignored. Order of first appearance is kept,
/// duplicates dropped, and at most `limit` links returned.
pub fn discover_links(document: &Html, base: &Url, keep: fn(&str) -> bool, limit: usize) -> Vec<String> {
    document
        .select(&ANCHORS)
        .filter(|a| !stripped_text(*a, "").is_empty())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| keep(href))
        .filter_map(|href| base.join(href).ok())
        .map(|u| u.to_string())
        .unique()
        .take(limit)
        .collect()
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self, timeout))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<RawBytes, FetchError> {
        let t0 = Instant::now();
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%status, "Non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let declared = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_of);
        let bytes = resp.bytes().await?.to_vec();

        let elapsed_ms = t0.elapsed().as_millis();
        if bytes.is_empty() {
            warn!(elapsed_ms, "Empty response body");
        } else {
            debug!(elapsed_ms, bytes = bytes.len(), charset = ?declared, "Fetched page");
        }
        Ok(RawBytes::new(url, bytes).with_declared_charset(declared))
    }
}

/// `charset` parameter of a `Content-Type` value.
pub fn charset_of(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_of() {
        assert_eq!(charset_of("text/html; charset=UTF-8"), Some("UTF-8".to_string()));
        assert_eq!(charset_of("text/html;charset=\"big5\""), Some("big5".to_string()));
        assert_eq!(charset_of("text/html"), None);
        assert_eq!(charset_of("text/html; charset="), None);
    }

    #[test]
    fn test_discover_links_dedupes_and_resolves() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a href="/football-betting/a1">第一篇</a>
                <a href="/football-betting/a1">重複</a>
                <a href="/football-betting/a2"> </a>
                <a href="/news/other">其他</a>
                <a href="https://www.stheadline.com/football-betting/a3"><span>第三篇</span></a>
            </body></html>"#,
        );
        let base = Url::parse(stheadline::LISTING_URL).unwrap();
        let links = discover_links(&doc, &base, stheadline::is_article_link, 60);
        assert_eq!(
            links,
            vec![
                "https://www.stheadline.com/football-betting/a1".to_string(),
                "https://www.stheadline.com/football-betting/a3".to_string(),
            ]
        );
    }

    #[test]
    fn test_discover_links_respects_limit() {
        let anchors: String = (0..10)
            .map(|i| format!("<a href=\"/football-betting/{i}\">文{i}</a>"))
            .collect();
        let doc = Html::parse_document(&format!("<html><body>{anchors}</body></html>"));
        let base = Url::parse(stheadline::LISTING_URL).unwrap();
        assert_eq!(discover_links(&doc, &base, stheadline::is_article_link, 3).len(), 3);
    }

    #[test]
    fn test_discovery_per_source() {
        assert!(matches!(discovery(SourceId::Oncc), Discovery::DateTemplate));
        assert!(matches!(
            discovery(SourceId::Am730),
            Discovery::Listing { url: am730::LISTING_URL, .. }
        ));
    }
}
