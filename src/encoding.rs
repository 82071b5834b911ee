//! Encoding recovery: raw response bytes to best-guess Unicode text.
//!
//! The three sources differ in how far their declared charset can be trusted:
//!
//! | Source | Strategy |
//! |--------|----------|
//! | on.cc | Big5 family + detector candidates, scored; declared charset ignored |
//! | 星島 / am730 | strict UTF-8, then detector guess, then lossy UTF-8 |
//! | anything else | transport charset or detector guess, then lossy UTF-8 |
//!
//! Candidates for on.cc are scored as
//! `(1 - mojibake_ratio) + 0.5 * cjk_ratio`; the first candidate with the
//! strictly highest score wins.

use crate::models::{DecodedText, RawBytes, SourceId};
use chardetng::EncodingDetector;
use encoding_rs::{BIG5, DecoderResult, Encoding, UTF_8};
use tracing::{debug, instrument};
use url::Url;

/// Labels of the legacy double-byte family on.cc serves, in trial order.
///
/// `encoding_rs` maps all of them onto the WHATWG Big5 decoder (which
/// already includes HKSCS and CP950 code points); duplicates are dropped.
const BIG5_FAMILY: &[&str] = &["big5-hkscs", "big5", "x-x-big5"];

/// Latin-1 characters typical of UTF-8 or Big5 bytes read with the wrong codec.
const MOJIBAKE_CHARS: &[char] = &[
    'å', 'æ', 'ç', 'ø', 'Ø', 'Å', 'Æ', 'Ç', 'œ', 'Œ', 'Ð', 'ð', 'þ', 'Þ', 'ƒ',
];

const CJK_WEIGHT: f64 = 0.5;

/// Recover text from a fetched page according to its source.
#[instrument(level = "debug", skip_all, fields(url = %raw.url, bytes = raw.bytes.len()))]
pub fn recover(raw: &RawBytes) -> DecodedText {
    let decoded = match raw.source {
        Some(SourceId::Oncc) => recover_big5_scored(&raw.bytes, tld_hint(&raw.url).as_deref()),
        Some(SourceId::StHeadline) | Some(SourceId::Am730) => recover_utf8_first(&raw.bytes),
        None => recover_declared(&raw.bytes, raw.declared_charset.as_deref()),
    };
    debug!(label = decoded.label, chars = decoded.text.chars().count(), "Recovered page text");
    decoded
}

/// Fraction of characters that look like decoding damage.
///
/// Counts U+FFFD, the [`MOJIBAKE_CHARS`] set and control characters other
/// than tab, newline and carriage return. An empty string is maximally bad.
pub fn mojibake_ratio(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 1.0;
    }
    let bad = s
        .chars()
        .filter(|&c| {
            c == '\u{FFFD}'
                || MOJIBAKE_CHARS.contains(&c)
                || ((c as u32) < 32 && !matches!(c, '\n' | '\r' | '\t'))
        })
        .count();
    bad as f64 / total as f64
}

/// Fraction of characters in the CJK Unified Ideographs block.
pub fn cjk_ratio(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }
    let cjk = s.chars().filter(|c| ('\u{4E00}'..='\u{9FFF}').contains(c)).count();
    cjk as f64 / total as f64
}

/// Score a decode candidate; higher is better.
pub fn score(candidate: &str) -> f64 {
    (1.0 - mojibake_ratio(candidate)) + CJK_WEIGHT * cjk_ratio(candidate)
}

/// Pick the best-scoring candidate. Ties keep the earliest candidate.
pub fn best_candidate(candidates: Vec<DecodedText>) -> Option<DecodedText> {
    let mut best: Option<(f64, DecodedText)> = None;
    for candidate in candidates {
        let s = score(&candidate.text);
        debug!(label = candidate.label, score = s, "Scored decode candidate");
        match &best {
            Some((best_score, _)) if s <= *best_score => {}
            _ => best = Some((s, candidate)),
        }
    }
    best.map(|(_, text)| text)
}

fn recover_big5_scored(bytes: &[u8], tld: Option<&[u8]>) -> DecodedText {
    let mut candidates = Vec::new();

    let mut family: Vec<&'static Encoding> = Vec::new();
    for label in BIG5_FAMILY {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            if !family.contains(&enc) {
                family.push(enc);
            }
        }
    }
    for enc in family {
        match decode_strict(enc, bytes) {
            Some(text) => candidates.push(DecodedText { text, label: enc.name() }),
            None => debug!(encoding = enc.name(), "Strict decode failed; candidate excluded"),
        }
    }

    let guess = detect(bytes, tld);
    candidates.push(DecodedText {
        text: decode_ignoring_errors(guess, bytes),
        label: guess.name(),
    });

    candidates.push(DecodedText {
        text: decode_ignoring_errors(BIG5, bytes),
        label: BIG5.name(),
    });

    best_candidate(candidates).unwrap_or_else(|| DecodedText {
        text: decode_ignoring_errors(BIG5, bytes),
        label: BIG5.name(),
    })
}

fn recover_utf8_first(bytes: &[u8]) -> DecodedText {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText { text: text.to_string(), label: UTF_8.name() };
    }
    let guess = detect(bytes, None);
    debug!(guess = guess.name(), "Declared UTF-8 failed; using detector guess");
    DecodedText {
        text: decode_ignoring_errors(guess, bytes),
        label: guess.name(),
    }
}

fn recover_declared(bytes: &[u8], declared: Option<&str>) -> DecodedText {
    let declared = declared
        .map(str::trim)
        .filter(|label| !label.is_empty() && !label.eq_ignore_ascii_case("ascii"))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    let enc = declared.unwrap_or_else(|| detect(bytes, None));

    match decode_strict(enc, bytes) {
        Some(text) => DecodedText { text, label: enc.name() },
        None => DecodedText {
            text: decode_ignoring_errors(UTF_8, bytes),
            label: UTF_8.name(),
        },
    }
}

/// Run the statistical detector over the whole body.
fn detect(bytes: &[u8], tld: Option<&[u8]>) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(tld, true)
}

/// Last DNS label of the URL host, used as a detector hint (`hk` for on.cc).
fn tld_hint(url: &str) -> Option<Vec<u8>> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let tld = host.rsplit('.').next()?;
    // chardetng expects lowercase ASCII and rejects multi-label values.
    if tld.is_empty() || !tld.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    // on.cc is a Hong Kong outlet behind a generic TLD.
    if tld.eq_ignore_ascii_case("cc") && host.ends_with("on.cc") {
        return Some(b"hk".to_vec());
    }
    Some(tld.to_ascii_lowercase().into_bytes())
}

/// Decode without replacement; `None` on any malformed sequence.
fn decode_strict(enc: &'static Encoding, bytes: &[u8]) -> Option<String> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

/// Decode, silently dropping malformed sequences instead of substituting U+FFFD.
fn decode_ignoring_errors(enc: &'static Encoding, bytes: &[u8]) -> String {
    let mut decoder = enc.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len().saturating_mul(3));
    let mut out = String::with_capacity(capacity);
    let mut input = bytes;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut out, true);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => out.reserve(input.len().saturating_mul(3) + 16),
            DecoderResult::Malformed(_, _) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big5_bytes(s: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = BIG5.encode(s);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_empty_string_ratios() {
        assert_eq!(mojibake_ratio(""), 1.0);
        assert_eq!(cjk_ratio(""), 0.0);
    }

    #[test]
    fn test_mojibake_ratio_counts_artifacts() {
        assert_eq!(mojibake_ratio("abcd"), 0.0);
        assert_eq!(mojibake_ratio("a\u{FFFD}"), 0.5);
        assert_eq!(mojibake_ratio("åæ"), 1.0);
        // Tab and newline are fine, other controls are not.
        assert_eq!(mojibake_ratio("\t\n\u{1}x"), 0.25);
    }

    #[test]
    fn test_cjk_ratio() {
        assert_eq!(cjk_ratio("主勝ab"), 0.5);
        assert_eq!(cjk_ratio("abc"), 0.0);
    }

    #[test]
    fn test_best_candidate_prefers_highest_score() {
        let candidates = vec![
            DecodedText { text: "å\u{FFFD}ab".to_string(), label: "a" },
            DecodedText { text: "英超前瞻".to_string(), label: "b" },
            DecodedText { text: "plain".to_string(), label: "c" },
        ];
        let best = best_candidate(candidates.clone()).unwrap();
        assert_eq!(best.label, "b");
        for c in &candidates {
            assert!(score(&best.text) >= score(&c.text));
        }
    }

    #[test]
    fn test_best_candidate_tie_keeps_first() {
        let candidates = vec![
            DecodedText { text: "same".to_string(), label: "first" },
            DecodedText { text: "same".to_string(), label: "second" },
        ];
        assert_eq!(best_candidate(candidates).unwrap().label, "first");
        assert!(best_candidate(Vec::new()).is_none());
    }

    #[test]
    fn test_oncc_big5_page_recovered() {
        let html = "<html><head><meta charset=\"utf-8\"><title>曼聯主場迎戰車路士</title></head><body>東網足球</body></html>";
        let raw = RawBytes::new(
            "https://football.on.cc/cnt/news/newa/20250824/fbnewa0101x0.html",
            big5_bytes(html),
        )
        .with_declared_charset(Some("utf-8".to_string()));

        let decoded = recover(&raw);
        assert_eq!(decoded.text, html);
        assert_eq!(decoded.label, "Big5");
    }

    #[test]
    fn test_utf8_source_trusts_utf8() {
        let html = "<p>英超 主勝</p>";
        let raw = RawBytes::new("https://www.stheadline.com/football-betting/1", html.as_bytes().to_vec());
        let decoded = recover(&raw);
        assert_eq!(decoded.text, html);
        assert_eq!(decoded.label, "UTF-8");
    }

    #[test]
    fn test_utf8_source_falls_back_on_invalid_bytes() {
        let raw = RawBytes::new("https://www.am730.com.hk/x", big5_bytes("西甲焦點戰，主隊勝算較高"));
        let decoded = recover(&raw);
        assert_ne!(decoded.label, "UTF-8");
        assert!(!decoded.text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_unknown_source_uses_declared_charset() {
        let raw = RawBytes::new("https://example.com/a", big5_bytes("德甲"))
            .with_declared_charset(Some("big5".to_string()));
        let decoded = recover(&raw);
        assert_eq!(decoded.text, "德甲");
        assert_eq!(decoded.label, "Big5");
    }

    #[test]
    fn test_unknown_source_declared_charset_failure_goes_lossy_utf8() {
        let mut bytes = "ok".as_bytes().to_vec();
        bytes.push(0xFF);
        let raw = RawBytes::new("https://example.com/a", bytes)
            .with_declared_charset(Some("utf-8".to_string()));
        let decoded = recover(&raw);
        assert_eq!(decoded.text, "ok");
        assert_eq!(decoded.label, "UTF-8");
    }

    #[test]
    fn test_decode_ignoring_errors_drops_malformed() {
        let bytes = [b'a', 0xFF, b'b'];
        assert_eq!(decode_ignoring_errors(UTF_8, &bytes), "ab");
    }

    #[test]
    fn test_tld_hint() {
        assert_eq!(tld_hint("https://football.on.cc/x"), Some(b"hk".to_vec()));
        assert_eq!(tld_hint("https://www.am730.com.hk/x"), Some(b"hk".to_vec()));
        assert_eq!(tld_hint("nonsense"), None);
    }
}
