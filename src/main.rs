//! # Ball Digest
//!
//! Collects the last 24 hours of football betting columns from three Hong
//! Kong outlets and writes them as one HTML page (plus a JSON twin).
//!
//! ## Sources
//!
//! - 星島頭條《波盤王》 and am730《波經》: title, a 2–3 sentence summary and
//!   betting-tip tags per article
//! - 東網《足球快訊》: title and link only
//!
//! ## Usage
//!
//! ```sh
//! ball_digest              # today (HKT)
//! ball_digest 2025-08-24   # a specific day
//! ```
//!
//! ## Architecture
//!
//! 1. **Discovery**: listing page links, or date-templated on.cc slots
//! 2. **Recovery**: raw bytes to text, with scored Big5 recovery for on.cc
//! 3. **Extraction**: title, description, date, tags, summary
//! 4. **Filtering**: trailing 24h window, at most 12 records per source
//! 5. **Output**: `news_summary_<YYYYMMDD>.html` and `.json`

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod encoding;
mod extract;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;
mod window;

use cli::Cli;
use config::ScrapeConfig;
use models::SourceBundle;
use outputs::{html, json, output_filename};
use pipeline::Pipeline;
use scrapers::HttpFetcher;
use utils::{hk_now, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // A malformed date exits here via clap, before anything is fetched or written.
    let args = Cli::parse();
    let start_time = std::time::Instant::now();

    let now = hk_now();
    let target_date = args.date.unwrap_or_else(|| now.date_naive());
    let stamp = now.format("%Y-%m-%d %H:%M（HKT）").to_string();
    info!(%now, %target_date, "ball_digest starting up");

    let config = ScrapeConfig::default();
    let fetcher = HttpFetcher::new(&config)?;
    let pipeline = Pipeline::new(&fetcher, &config, now);

    let reports = pipeline.run(target_date).await;
    for report in &reports {
        for (url, reason) in &report.skipped {
            debug!(source = %report.bundle.source, url = %truncate_for_log(url, 120), %reason, "Skipped");
        }
    }
    let bundles: Vec<SourceBundle> = reports.into_iter().map(|r| r.bundle).collect();

    let html_path = PathBuf::from(output_filename(&config.output_prefix, target_date, "html"));
    let page = html::render(&stamp, &bundles);
    if let Err(e) = tokio::fs::write(&html_path, page).await {
        error!(path = %html_path.display(), error = %e, "Failed writing HTML digest");
        return Err(e.into());
    }
    info!(path = %html_path.display(), "Wrote HTML digest");

    let json_path = PathBuf::from(output_filename(&config.output_prefix, target_date, "json"));
    if let Err(e) = json::write_digest(&json_path, &now.to_rfc3339(), &bundles).await {
        error!(path = %json_path.display(), error = %e, "Failed writing JSON digest");
    }

    let total: usize = bundles.iter().map(|b| b.records.len()).sum();
    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        records = total,
        "Execution complete"
    );
    println!("[+] 已輸出：{}", html_path.display());

    Ok(())
}
