//! Betting-tip tags and the injury/lineup signal.
//!
//! Tips come from a static, priority-ordered table of `(pattern, label)`
//! pairs. A label is emitted at most once however often its pattern hits.

use once_cell::sync::Lazy;
use regex::Regex;

/// `(pattern, label)` rules in output priority order.
const TIP_RULES: &[(&str, &str)] = &[
    (r"主勝|主隊勝|坐和望贏", "主勝"),
    (r"客勝|客隊勝", "客勝"),
    (r"讓[一二兩]球半?|受讓|受[一二兩]球|上盤|下盤|讓球|受讓盤", "讓球/受讓"),
    (r"大\s*2\.5|大盤|大波|入球.*多", "大 2.5"),
    (r"小\s*2\.5|小盤|小波|入球.*少", "小 2.5"),
];

static TIP_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    TIP_RULES
        .iter()
        .map(|(pat, label)| (Regex::new(pat).expect("valid tip regex"), *label))
        .collect()
});

static INJURY_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"傷缺|傷停|停賽|傷患|復出|傷癒|缺陣|掛牌|紅牌|黃牌累積").expect("valid injury regex")
});

/// Tip labels found in `text`, in rule order, without duplicates.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for (pattern, label) in TIP_PATTERNS.iter() {
        if pattern.is_match(text) && !tags.iter().any(|t| t == label) {
            tags.push(label.to_string());
        }
    }
    tags
}

/// Whether `text` mentions injuries, suspensions or lineup changes.
pub fn mentions_lineup_factors(text: &str) -> bool {
    INJURY_PAT.is_match(text)
}

/// Join title, description and page text the way every scanner expects.
///
/// Absent parts contribute an empty string.
pub fn scan_text(title: &str, description: Option<&str>, full_text: &str) -> String {
    format!("{}｜{}｜{}", title, description.unwrap_or(""), full_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_win_deduplicated() {
        let tags = extract_tags("主隊勝出機會大，主勝。再講一次主勝");
        assert_eq!(tags, vec!["主勝".to_string()]);
    }

    #[test]
    fn test_priority_order_is_table_order() {
        let tags = extract_tags("睇細：小波。客隊勝面高，主勝亦有機，受讓半球");
        assert_eq!(tags, vec!["主勝", "客勝", "讓球/受讓", "小 2.5"]);
    }

    #[test]
    fn test_over_two_and_a_half_with_space() {
        assert_eq!(extract_tags("推介 大 2.5"), vec!["大 2.5"]);
        assert_eq!(extract_tags("推介 大2.5"), vec!["大 2.5"]);
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags("純粹球會新聞").is_empty());
        assert!(extract_tags("").is_empty());
    }

    #[test]
    fn test_lineup_signal_is_separate() {
        assert!(mentions_lineup_factors("主力中堅傷停兩周"));
        assert!(!mentions_lineup_factors("主勝"));
        assert!(extract_tags("主力中堅傷停兩周").is_empty());
    }

    #[test]
    fn test_scan_text_joins_with_fullwidth_bar() {
        assert_eq!(scan_text("a", None, "c"), "a｜｜c");
        assert_eq!(scan_text("a", Some("b"), ""), "a｜b｜");
    }
}
