//! JSON companion of the HTML digest.
//!
//! Mirrors the bundles one-to-one so other tools can consume a run without
//! scraping the HTML. Instants serialize as RFC 3339 at +08:00.

use crate::models::SourceBundle;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct Digest<'a> {
    generated_at: &'a str,
    sources: &'a [SourceBundle],
}

/// Serialize the bundles with the run stamp.
pub fn render(generated_at: &str, bundles: &[SourceBundle]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Digest {
        generated_at,
        sources: bundles,
    })
}

/// Write the JSON digest to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_digest(path: &Path, generated_at: &str, bundles: &[SourceBundle]) -> Result<(), Box<dyn Error>> {
    let json = render(generated_at, bundles)?;
    fs::write(path, json).await?;
    info!("Wrote JSON digest");
    Ok(())
}
