//! 東網《足球快訊》.
//!
//! on.cc has no usable listing page; articles of a day sit at predictable
//! slots `fbnewa01NNx0.html` under `/cnt/news/newa/<YYYYMMDD>/`. Pages are
//! served in Big5 whatever their headers claim.

use chrono::NaiveDate;

const BASE: &str = "https://football.on.cc/cnt/news/newa";

/// Candidate article URLs for `date`, slots `01..=slots` in order.
pub fn candidate_urls(date: NaiveDate, slots: u32) -> Vec<String> {
    let ymd = date.format("%Y%m%d");
    (1..=slots)
        .map(|i| format!("{BASE}/{ymd}/fbnewa01{i:02}x0.html"))
        .collect()
}
