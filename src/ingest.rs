//! Spreadsheet ingestion.
//!
//! Turns the CSV export of the project spreadsheet into [`ProjectRecord`]s:
//! source → row mappings → title filter → projection. The example record is
//! prepended so callers get the complete list in one go.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::config::Config;
use crate::models::{example_project, ProjectRecord};
use crate::sources::{source_from_config, CsvSource};

pub const COL_TITLE: &str = "Project Title";
pub const COL_DESCRIPTION: &str = "Project Description";
pub const COL_AUTHOR: &str = "Author Name";
pub const COL_IMAGE_URL: &str = "Image URL";
pub const COL_TAGS: &str = "Project Tags";
pub const COL_FEEDBACK_URL: &str = "Feedback Form URL (optional)";
pub const COL_GITHUB_URL: &str = "GitHub Repo URL";
pub const COL_TIMESTAMP: &str = "Timestamp";

/// One spreadsheet row keyed by header name.
pub type Row = HashMap<String, String>;

/// Fetches from the configured source and returns `[example, ...records]`.
pub async fn load_projects(config: &Config) -> Result<Vec<ProjectRecord>> {
    let source = source_from_config(config)?;
    fetch_projects(source.as_ref()).await
}

/// Fetches and parses one CSV document from `source`.
pub async fn fetch_projects(source: &dyn CsvSource) -> Result<Vec<ProjectRecord>> {
    let text = source.fetch().await?;
    let rows = parse_rows(&text)
        .with_context(|| format!("malformed CSV from {}", source.describe()))?;
    let records = project_rows(&rows);

    log::info!(
        "loaded {} projects from {} ({} rows)",
        records.len(),
        source.describe(),
        rows.len()
    );

    let mut projects = Vec::with_capacity(records.len() + 1);
    projects.push(example_project());
    projects.extend(records);
    Ok(projects)
}

/// Parses CSV text whose first row names the columns.
///
/// Quoted cells may contain commas and newlines. Short rows are accepted;
/// their trailing columns are simply missing from the mapping.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Drops untitled rows and numbers the rest from 1 in source order.
pub fn project_rows(rows: &[Row]) -> Vec<ProjectRecord> {
    rows.iter()
        .filter(|row| has_title(row))
        .enumerate()
        .map(|(index, row)| project_row(index as u32 + 1, row))
        .collect()
}

fn has_title(row: &Row) -> bool {
    row.get(COL_TITLE)
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false)
}

fn project_row(id: u32, row: &Row) -> ProjectRecord {
    let text = |col: &str| row.get(col).cloned().unwrap_or_default();

    ProjectRecord {
        id,
        title: text(COL_TITLE),
        description: text(COL_DESCRIPTION),
        author: text(COL_AUTHOR),
        image_url: optional(row, COL_IMAGE_URL),
        tags: row
            .get(COL_TAGS)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .map(split_tags)
            .unwrap_or_default(),
        feedback_form_url: optional(row, COL_FEEDBACK_URL),
        github_repo_url: optional(row, COL_GITHUB_URL),
        timestamp: optional(row, COL_TIMESTAMP),
    }
}

/// Blank cells count as absent.
fn optional(row: &Row, col: &str) -> Option<String> {
    row.get(col)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Splits a comma-delimited tag cell, trimming each piece.
///
/// Pieces are kept even when they trim to nothing; only an absent or empty
/// cell yields no tags, and that is decided by the caller.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).map(str::to_string).collect()
}
