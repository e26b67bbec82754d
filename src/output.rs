//! Output of a finished harvest: a JSON file and a console summary.

use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;

use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::HarvestResult;

/// Write `result` as pretty-printed JSON to `path`, creating parent
/// directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_json(result: &HarvestResult, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = result.len(), "Wrote harvest JSON");
    Ok(())
}

/// Human-readable summary: counts, then the first article.
pub fn summary(result: &HarvestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Collected {} of {} articles in {} page(s).",
        result.len(),
        result.declared_total,
        result.pages_fetched
    );

    match result.records.first() {
        Some(first) => {
            let _ = writeln!(out, "First article:");
            let _ = writeln!(out, "  Title:       {}", first.title);
            let _ = writeln!(out, "  Description: {}", first.description);
            let _ = writeln!(out, "  Published:   {}", first.publish_date.to_rfc2822());
            if let Some(link) = first.original_link.as_ref().or(first.link.as_ref()) {
                let _ = writeln!(out, "  Link:        {link}");
            }
        }
        None => {
            let _ = writeln!(out, "No articles found.");
        }
    }
    out
}
