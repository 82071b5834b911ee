//! am730《波經》 column.
//!
//! Article hrefs live under the sports section, sometimes percent-encoded
//! (`/%E9%AB%94%E8%82%B2/`) and sometimes raw (`/體育/`).

/// Column listing page.
pub const LISTING_URL: &str = "https://www.am730.com.hk/%E9%AB%94%E8%82%B2/%E6%B3%A2%E7%B6%93";

const SPORTS_SEGMENT: &str = "/體育/";

/// Whether a listing href points at a sports article.
pub fn is_article_link(href: &str) -> bool {
    if href.contains(SPORTS_SEGMENT) {
        return true;
    }
    urlencoding::decode(href)
        .map(|decoded| decoded.contains(SPORTS_SEGMENT))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_and_encoded_segments() {
        assert!(is_article_link("/體育/波經/英超前瞻/123"));
        assert!(is_article_link("/%E9%AB%94%E8%82%B2/%E6%B3%A2%E7%B6%93/456"));
        assert!(is_article_link("/%e9%ab%94%e8%82%b2/789"));
        assert!(!is_article_link("/%E6%96%B0%E8%81%9E/1"));
        assert!(!is_article_link("/about"));
    }
}
