//! Per-source record pipeline.
//!
//! For every source: discover candidate URLs, then for each candidate in
//! order fetch → recover text → extract → filter by the 24h window, until
//! the per-source cap is reached. A failing page is recorded as skipped and
//! never aborts its siblings or other sources.
//!
//! Everything runs sequentially; `now` is fixed for the whole run.

use crate::config::ScrapeConfig;
use crate::encoding;
use crate::extract::content::extract_title_and_description;
use crate::extract::date::resolve_date;
use crate::extract::summary::compose;
use crate::extract::tags::{extract_tags, scan_text};
use crate::extract::{NO_SUMMARY, full_text};
use crate::models::{ArticleRecord, ExtractedSignals, RawBytes, SourceBundle, SourceId};
use crate::scrapers::{Discovery, FetchError, PageFetcher, discover_links, discovery, oncc};
use crate::window::admit;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use futures::stream::{self, StreamExt};
use scraper::Html;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Why a candidate page produced no record.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("no publication date found")]
    NoDate,
    #[error("published at {0} is outside the 24h window")]
    OutsideWindow(DateTime<FixedOffset>),
}

/// Outcome of one candidate page.
pub type PageOutcome = Result<ArticleRecord, SkipReason>;

/// A source's bundle plus the pages that were skipped on the way.
#[derive(Debug)]
pub struct SourceReport {
    pub bundle: SourceBundle,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Drives discovery and extraction for all sources with a fixed `now`.
#[derive(Debug)]
pub struct Pipeline<'a, F> {
    fetcher: &'a F,
    config: &'a ScrapeConfig,
    now: DateTime<FixedOffset>,
}

impl<'a, F: PageFetcher> Pipeline<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a ScrapeConfig, now: DateTime<FixedOffset>) -> Self {
        Self { fetcher, config, now }
    }

    /// Run every source in order. `target_date` picks the on.cc day.
    pub async fn run(&self, target_date: NaiveDate) -> Vec<SourceReport> {
        stream::iter(SourceId::ALL)
            .then(|source| self.run_source(source, target_date))
            .collect()
            .await
    }

    /// Build the bundle for one source.
    #[instrument(level = "info", skip(self), fields(now = %self.now))]
    pub async fn run_source(&self, source: SourceId, target_date: NaiveDate) -> SourceReport {
        let mut report = SourceReport {
            bundle: SourceBundle::empty(source),
            skipped: Vec::new(),
        };

        let (candidates, link_only_at) = match discovery(source) {
            Discovery::Listing { url, keep } => (self.listing_candidates(source, url, keep).await, None),
            Discovery::DateTemplate => {
                let published_at = day_start(target_date, *self.now.offset());
                if !admit(published_at, self.now) {
                    info!(%source, %target_date, "Target date is outside the 24h window; nothing to fetch");
                    return report;
                }
                (oncc::candidate_urls(target_date, self.config.oncc_slots), published_at)
            }
        };
        info!(%source, count = candidates.len(), "Candidate pages");

        let cap = self.config.max_per_source;
        let mut outcomes = std::pin::pin!(stream::iter(candidates).then(|url| async move {
            let outcome = self.process_page(source, &url, link_only_at).await;
            (url, outcome)
        }));

        while report.bundle.records.len() < cap {
            let Some((url, outcome)) = outcomes.next().await else {
                break;
            };
            match outcome {
                Ok(record) => {
                    debug!(%url, title = %record.title, "Admitted record");
                    report.bundle.records.push(record);
                }
                Err(reason) => {
                    debug!(%url, %reason, "Skipped page");
                    report.skipped.push((url, reason));
                }
            }
        }

        info!(
            %source,
            admitted = report.bundle.records.len(),
            skipped = report.skipped.len(),
            "Finished source"
        );
        report
    }

    async fn listing_candidates(&self, source: SourceId, listing_url: &str, keep: fn(&str) -> bool) -> Vec<String> {
        let base = match Url::parse(listing_url) {
            Ok(base) => base,
            Err(e) => {
                warn!(%source, url = listing_url, error = %e, "Invalid listing URL");
                return Vec::new();
            }
        };
        match self.fetcher.fetch(listing_url, self.config.listing_timeout).await {
            Ok(raw) => {
                let decoded = encoding::recover(&raw);
                let document = Html::parse_document(&decoded.text);
                discover_links(&document, &base, keep, self.config.max_links)
            }
            Err(e) => {
                warn!(%source, url = listing_url, error = %e, "Listing fetch failed; source will be empty");
                Vec::new()
            }
        }
    }

    async fn process_page(
        &self,
        source: SourceId,
        url: &str,
        link_only_at: Option<DateTime<FixedOffset>>,
    ) -> PageOutcome {
        let timeout = if source.is_link_only() {
            self.config.oncc_timeout
        } else {
            self.config.listing_timeout
        };
        let raw = self.fetcher.fetch(url, timeout).await?;
        match link_only_at {
            Some(published_at) => Ok(link_only_record(&raw, source, published_at)),
            None => extract_article(&raw, source, self.now),
        }
    }
}

/// Midnight of `date` at `offset`.
fn day_start(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

/// Pull title, description, date, tags and page text out of a fetched page.
pub fn extract_signals(raw: &RawBytes, source: SourceId, offset: FixedOffset) -> ExtractedSignals {
    let decoded = encoding::recover(raw);
    let document = Html::parse_document(&decoded.text);

    let (title, description) = extract_title_and_description(&document, Some(source), &raw.url);
    let published_at = resolve_date(&document, &raw.url, offset);
    let full_text = full_text(&document);
    let description = (description != NO_SUMMARY).then_some(description);
    let tags = extract_tags(&scan_text(&title, description.as_deref(), &full_text));

    ExtractedSignals {
        title,
        description,
        published_at,
        tags,
        full_text,
    }
}

/// Turn a fetched article page into an admitted record, or say why not.
pub fn extract_article(raw: &RawBytes, source: SourceId, now: DateTime<FixedOffset>) -> PageOutcome {
    let signals = extract_signals(raw, source, *now.offset());
    let published_at = signals.published_at.ok_or(SkipReason::NoDate)?;
    if !admit(Some(published_at), now) {
        return Err(SkipReason::OutsideWindow(published_at));
    }

    let (summary, tags) = if source.is_link_only() {
        (String::new(), Vec::new())
    } else {
        let description = signals.description.as_deref().unwrap_or(NO_SUMMARY);
        let (summary, _) = compose(&signals.title, description, &signals.full_text);
        (summary, signals.tags)
    };

    Ok(ArticleRecord {
        source,
        url: raw.url.clone(),
        title: signals.title,
        summary,
        tags,
        published_at,
    })
}

/// Title + link record for a link-only source.
pub fn link_only_record(raw: &RawBytes, source: SourceId, published_at: DateTime<FixedOffset>) -> ArticleRecord {
    let decoded = encoding::recover(raw);
    let document = Html::parse_document(&decoded.text);
    let (title, _) = extract_title_and_description(&document, Some(source), &raw.url);
    ArticleRecord {
        source,
        url: raw.url.clone(),
        title,
        summary: String::new(),
        tags: Vec::new(),
        published_at,
    }
}
