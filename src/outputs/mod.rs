//! Output generation.
//!
//! # Submodules
//!
//! - [`html`]: the self-contained daily digest page
//! - [`json`]: the same bundles as JSON for other tools
//!
//! # Output Structure
//!
//! ```text
//! ./
//! ├── news_summary_20250824.html
//! └── news_summary_20250824.json
//! ```

use chrono::NaiveDate;

pub mod html;
pub mod json;

/// `<prefix>_<YYYYMMDD>.<ext>`
pub fn output_filename(prefix: &str, date: NaiveDate, ext: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y%m%d"), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 24).unwrap();
        assert_eq!(output_filename("news_summary", date, "html"), "news_summary_20250824.html");
    }
}
