//! Runtime limits and transport settings.
//!
//! There is no config file; every knob has a fixed default matching what
//! the three sites tolerate.

use std::time::Duration;

/// Browser-like user agent; the listing pages reject obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Records kept per source.
    pub max_per_source: usize,
    /// Links taken from a listing page.
    pub max_links: usize,
    /// Synthesized on.cc article slots per day.
    pub oncc_slots: u32,
    pub listing_timeout: Duration,
    pub oncc_timeout: Duration,
    pub user_agent: String,
    /// Output files are `<prefix>_<YYYYMMDD>.html` / `.json`.
    pub output_prefix: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_per_source: 12,
            max_links: 60,
            oncc_slots: 100,
            listing_timeout: Duration::from_secs(15),
            oncc_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_prefix: "news_summary".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.max_per_source, 12);
        assert_eq!(config.max_links, 60);
        assert_eq!(config.oncc_slots, 100);
        assert_eq!(config.output_prefix, "news_summary");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }
}
