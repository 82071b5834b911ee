//! Command-line interface.
//!
//! A single optional positional argument: the digest date as `YYYY-MM-DD`.
//! It names the output files and picks the on.cc day; the 24-hour window
//! itself is always anchored to the current time.

use chrono::NaiveDate;
use clap::Parser;

/// Digest the last 24 hours of Hong Kong football betting columns.
///
/// # Examples
///
/// ```sh
/// # Today's digest (Hong Kong date)
/// ball_digest
///
/// # Name the output after, and read on.cc for, a specific day
/// ball_digest 2025-08-24
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Digest date, e.g. 2025-08-24 (defaults to today in Hong Kong)
    #[arg(value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("日期格式錯誤，請用 YYYY-MM-DD，例如：2025-08-24 (got {s:?})"))
}
