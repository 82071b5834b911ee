//! Data models shared by the extraction pipeline.
//!
//! - [`SourceId`]: the three known football columns
//! - [`RawBytes`] / [`DecodedText`]: a page before and after encoding recovery
//! - [`ExtractedSignals`]: transient per-page extraction state
//! - [`ArticleRecord`] / [`SourceBundle`]: the output handed to the renderers

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use url::Url;

/// One of the known news sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// 星島頭條《波盤王》
    StHeadline,
    /// am730《波經》
    Am730,
    /// 東網《足球快訊》, published as title + link only.
    Oncc,
}

impl SourceId {
    /// All sources, in rendering order.
    pub const ALL: [SourceId; 3] = [SourceId::StHeadline, SourceId::Am730, SourceId::Oncc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::StHeadline => "stheadline",
            SourceId::Am730 => "am730",
            SourceId::Oncc => "oncc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::StHeadline => "星島頭條《波盤王》",
            SourceId::Am730 => "am730《波經》",
            SourceId::Oncc => "東網《足球快訊》",
        }
    }

    /// Sources whose records intentionally carry no summary or tags.
    pub fn is_link_only(&self) -> bool {
        matches!(self, SourceId::Oncc)
    }

    /// Identify a source from an article or listing URL by its host.
    ///
    /// Returns `None` for hosts outside the three known sites.
    pub fn from_url(url: &str) -> Option<SourceId> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        if host.ends_with("football.on.cc") {
            Some(SourceId::Oncc)
        } else if host.ends_with("stheadline.com") {
            Some(SourceId::StHeadline)
        } else if host.ends_with("am730.com.hk") {
            Some(SourceId::Am730)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response body exactly as the transport delivered it.
#[derive(Debug, Clone)]
pub struct RawBytes {
    /// Source detected from the URL, `None` for unknown hosts.
    pub source: Option<SourceId>,
    /// URL the bytes were fetched from.
    pub url: String,
    /// The body.
    pub bytes: Vec<u8>,
    /// Charset named by the transport (`Content-Type`), if any.
    pub declared_charset: Option<String>,
}

impl RawBytes {
    pub fn new(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        let url = url.into();
        Self {
            source: SourceId::from_url(&url),
            url,
            bytes,
            declared_charset: None,
        }
    }

    pub fn with_declared_charset(mut self, charset: Option<String>) -> Self {
        self.declared_charset = charset;
        self
    }
}

/// Best-guess Unicode text recovered from [`RawBytes`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub text: String,
    /// Name of the encoding the text was decoded with.
    pub label: &'static str,
}

/// Everything pulled out of one page before the record is assembled.
#[derive(Debug, Clone, Default)]
pub struct ExtractedSignals {
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub tags: Vec<String>,
    pub full_text: String,
}

/// One admitted article, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    pub source: SourceId,
    pub url: String,
    pub title: String,
    /// Empty for link-only sources.
    pub summary: String,
    pub tags: Vec<String>,
    /// Always expressed at +08:00.
    pub published_at: DateTime<FixedOffset>,
}

/// The records of a single source, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceBundle {
    pub source: SourceId,
    pub display_name: String,
    pub records: Vec<ArticleRecord>,
}

impl SourceBundle {
    pub fn empty(source: SourceId) -> Self {
        Self {
            source,
            display_name: source.display_name().to_string(),
            records: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_source_from_url() {
        assert_eq!(
            SourceId::from_url("https://football.on.cc/cnt/news/newa/20250824/fbnewa0101x0.html"),
            Some(SourceId::Oncc)
        );
        assert_eq!(
            SourceId::from_url("https://www.stheadline.com/football-betting/abc"),
            Some(SourceId::StHeadline)
        );
        assert_eq!(
            SourceId::from_url("https://www.am730.com.hk/%E9%AB%94%E8%82%B2/1"),
            Some(SourceId::Am730)
        );
        assert_eq!(SourceId::from_url("https://example.com/"), None);
        assert_eq!(SourceId::from_url("not a url"), None);
    }

    #[test]
    fn test_raw_bytes_detects_source() {
        let raw = RawBytes::new("https://www.am730.com.hk/x", b"abc".to_vec());
        assert_eq!(raw.source, Some(SourceId::Am730));
        assert!(raw.declared_charset.is_none());
    }

    #[test]
    fn test_only_oncc_is_link_only() {
        assert!(SourceId::Oncc.is_link_only());
        assert!(!SourceId::StHeadline.is_link_only());
        assert!(!SourceId::Am730.is_link_only());
    }

    #[test]
    fn test_record_serialization() {
        let hk = FixedOffset::east_opt(8 * 3600).unwrap();
        let record = ArticleRecord {
            source: SourceId::StHeadline,
            url: "https://www.stheadline.com/football-betting/1".to_string(),
            title: "英超前瞻".to_string(),
            summary: "賽事：英超。".to_string(),
            tags: vec!["主勝".to_string()],
            published_at: hk.with_ymd_and_hms(2025, 8, 24, 18, 0, 0).unwrap(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"source\":\"stheadline\""));
        assert!(json.contains("2025-08-24T18:00:00+08:00"));
    }
}
