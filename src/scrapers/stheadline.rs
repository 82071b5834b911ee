//! 星島頭條《波盤王》 betting column.
//!
//! The listing page links articles with relative hrefs under
//! `/football-betting/`. Pages are UTF-8.

/// Column listing page.
pub const LISTING_URL: &str = "https://www.stheadline.com/football-betting/%E6%B3%A2%E7%9B%A4%E7%8E%8B";

/// Whether a listing href points at a betting-column article.
pub fn is_article_link(href: &str) -> bool {
    href.contains("/football-betting/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_article_link() {
        assert!(is_article_link("/football-betting/波盤王/123456/英超前瞻"));
        assert!(is_article_link("https://www.stheadline.com/football-betting/1"));
        assert!(!is_article_link("/sports/123"));
    }
}
