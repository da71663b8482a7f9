//! Export the project list as JSON.
//!
//! Writes every record, example included, as a pretty-printed JSON array.
//! Useful for feeding a static site or checking what the spreadsheet
//! currently yields.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::ingest;

/// Export all projects as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping. Unlike `list`, an ingestion failure is an error
/// here: an export of just the example would be misleading.
pub async fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let projects = ingest::load_projects(config).await?;
    let json = serde_json::to_string_pretty(&projects)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            log::info!("exported {} projects to {}", projects.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
