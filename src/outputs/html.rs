//! Self-contained HTML digest.
//!
//! One section per source with a pill and a count. Empty sources render
//! an explicit "no updates" line instead of disappearing. Link-only
//! sources show title and link only.

use crate::models::{SourceBundle, SourceId};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const NO_UPDATES: &str = "今日未見更新";

const CSS: &str = "
body{font-family:-apple-system,BlinkMacSystemFont,Segoe UI,Roboto,Helvetica,Arial,'Noto Sans TC','PingFang TC','Microsoft JhengHei',sans-serif;background:#f8fafc;color:#0f172a;}
.wrap{max-width:1000px;margin:32px auto;padding:0 16px;}
.src{display:flex;align-items:center;gap:8px;margin:16px 0 8px;}
.pill{display:inline-block;padding:4px 10px;border-radius:999px;font-size:12px;font-weight:600;border:1px solid}
.p-st{background:#ecfdf5;color:#065f46;border-color:#a7f3d0;}
.p-am{background:#eff6ff;color:#1e40af;border-color:#bfdbfe;}
.p-on{background:#fffbeb;color:#92400e;border-color:#fde68a;}
ul{margin:0 0 18px 20px}
li{margin:10px 0;padding:10px;border:1px solid #e5e7eb;border-radius:12px;background:#fff}
a{color:#0ea5e9;text-decoration:underline;font-weight:700}
.muted{color:#64748b;font-size:12px}
.badges span{display:inline-block;border:1px solid #e5e7eb;border-radius:999px;background:#f1f5f9;padding:2px 8px;margin-right:6px;font-size:12px}
";

fn pill_class(source: SourceId) -> &'static str {
    match source {
        SourceId::StHeadline => "p-st",
        SourceId::Am730 => "p-am",
        SourceId::Oncc => "p-on",
    }
}

/// Render the digest. `stamp` is the human-readable run time shown in the header.
pub fn render(stamp: &str, bundles: &[SourceBundle]) -> String {
    let stamp = encode_text(stamp);
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_page(&mut out, &stamp, bundles);
    out
}

fn write_page(out: &mut String, stamp: &str, bundles: &[SourceBundle]) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html><html lang=\"zh-Hant\"><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">")?;
    writeln!(out, "<title>每日足球新聞摘要 {stamp}</title><style>{CSS}</style></head><body>")?;
    writeln!(out, "<div class=\"wrap\">")?;
    writeln!(out, "<h1 style=\"margin:0\">每日足球新聞摘要</h1>")?;
    writeln!(
        out,
        "<div class=\"muted\">香港時間 {stamp} 內最近 24 小時新文；每來源最多 12 篇。</div>"
    )?;

    for bundle in bundles {
        writeln!(
            out,
            "<div class=\"src\"><span class=\"pill {}\">{}</span><span class=\"muted\">{} 篇</span></div>",
            pill_class(bundle.source),
            encode_text(&bundle.display_name),
            bundle.records.len()
        )?;
        if bundle.records.is_empty() {
            writeln!(out, "<div class=\"muted\">{NO_UPDATES}</div>")?;
            continue;
        }

        writeln!(out, "<ul>")?;
        for record in &bundle.records {
            writeln!(out, "<li>")?;
            writeln!(
                out,
                "<div>—「{}」　<a href=\"{}\" target=\"_blank\" rel=\"noopener\">（直達連結）</a></div>",
                encode_text(&record.title),
                encode_double_quoted_attribute(&record.url)
            )?;
            if !bundle.source.is_link_only() {
                if !record.summary.is_empty() {
                    writeln!(
                        out,
                        "<div style=\"margin-top:6px\">{}</div>",
                        encode_text(&record.summary)
                    )?;
                }
                if !record.tags.is_empty() {
                    writeln!(out, "<div class=\"badges\" style=\"margin-top:6px\">")?;
                    for tag in &record.tags {
                        writeln!(out, "<span>{}</span>", encode_text(tag))?;
                    }
                    writeln!(out, "</div>")?;
                }
            }
            writeln!(out, "</li>")?;
        }
        writeln!(out, "</ul>")?;
    }

    write!(out, "</div></body></html>")
}
