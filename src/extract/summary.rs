//! Summary composition.
//!
//! Sentences are appended in a fixed order, each only when its signal is
//! present:
//!
//! 1. league / matchup
//! 2. kickoff time
//! 3. the description, truncated at a 。 inside `[100, 180)` or hard at 160
//! 4. tip tags
//! 5. a generic lineup/injury note, only while fewer than 3 sentences exist
//!
//! With no sentence at all the summary is the description itself.

use super::NO_SUMMARY;
use super::tags::{extract_tags, mentions_lineup_factors, scan_text};
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

const TRUNCATE_ABOVE: usize = 180;
const FULL_STOP_WINDOW_START: usize = 100;
const HARD_CUT: usize = 160;
const ELLIPSIS: char = '…';
const LINEUP_NOTE: &str = "另有提及傷停／人腳變動。";

static LEAGUE_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(英超|英冠|西甲|意甲|德甲|法甲|港超|沙特超|歐聯|歐霸|足總盃|聯賽盃|亞冠|世盃外|歐國盃|友賽|季前賽|日職|韓K)",
    )
    .expect("valid league regex")
});

static KICKOFF_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}[:：][0-9]{2})\s*(HKT|香港時間|本港時間)?").expect("valid kickoff regex")
});

static VS_PAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([A-Za-z\x{4e00}-\x{9fa5}\x{3400}-\x{4dbf}.·]+)\s*(?:vs\.?|對|鬥|迎戰|對陣)\s*([A-Za-z\x{4e00}-\x{9fa5}\x{3400}-\x{4dbf}.·]+)",
    )
    .expect("valid matchup regex")
});

/// Compose `(summary, tags)` for one article.
pub fn compose(title: &str, description: &str, full_text: &str) -> (String, Vec<String>) {
    let src = scan_text(title, Some(description), full_text);

    let matchup = VS_PAT
        .captures(&src)
        .map(|c| format!("{} 對 {}", c[1].trim(), c[2].trim()));
    let league = LEAGUE_PAT.captures(&src).map(|c| c[1].to_string());
    let kickoff = KICKOFF_PAT.captures(&src).map(|c| c[1].to_string());
    let tags = extract_tags(&src);

    let mut sentences: Vec<String> = Vec::new();
    match (&league, &matchup) {
        (Some(league), Some(vs)) => sentences.push(format!("{league} 對碰：{vs}。")),
        (None, Some(vs)) => sentences.push(format!("對碰：{vs}。")),
        (Some(league), None) => sentences.push(format!("賽事：{league}。")),
        (None, None) => {}
    }
    if let Some(kickoff) = &kickoff {
        sentences.push(format!("開賽時間（本港）：{kickoff}。"));
    }
    if description != NO_SUMMARY {
        let core = truncate_description(&collapse_whitespace(description));
        if !core.is_empty() {
            sentences.push(core);
        }
    }
    if !tags.is_empty() {
        sentences.push(format!("貼士傾向：{}。", tags.join("、")));
    }
    if sentences.len() < 3 && mentions_lineup_factors(&src) {
        sentences.push(LINEUP_NOTE.to_string());
    }

    if sentences.is_empty() {
        let fallback = if description.is_empty() { NO_SUMMARY } else { description };
        return (fallback.trim().to_string(), tags);
    }
    (sentences.join(" ").trim().to_string(), tags)
}

/// Cap an already collapsed description.
///
/// Strings longer than 180 chars are cut before the last 。 starting in
/// `[100, 180)`, or at 160 chars when there is none, then get a `…`.
pub fn truncate_description(core: &str) -> String {
    let chars: Vec<char> = core.chars().collect();
    if chars.len() <= TRUNCATE_ABOVE {
        return core.to_string();
    }
    let cut = chars[FULL_STOP_WINDOW_START..TRUNCATE_ABOVE]
        .iter()
        .rposition(|&c| c == '。')
        .map(|i| FULL_STOP_WINDOW_START + i)
        .unwrap_or(HARD_CUT);
    let mut out: String = chars[..cut].iter().collect::<String>().trim().to_string();
    out.push(ELLIPSIS);
    out
}
