//! Live search over the project list.
//!
//! Matching is a case-insensitive substring test against title, author and
//! each tag. There is no ranking: results keep the input order.

use anyhow::Result;

use crate::config::Config;
use crate::ingest;
use crate::models::{example_project, ProjectRecord};

pub const NO_RESULTS: &str = "No projects found matching your search.";

/// Returns the records matching `term`, in input order.
///
/// An empty term matches every record.
pub fn filter_projects<'a>(records: &'a [ProjectRecord], term: &str) -> Vec<&'a ProjectRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
fn matches(record: &ProjectRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.author.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Loads the list once for a CLI command.
///
/// Ingestion failures are logged and leave only the example, the same way
/// the server keeps its initial list when the startup fetch fails.
pub async fn load_or_example(config: &Config) -> Vec<ProjectRecord> {
    match ingest::load_projects(config).await {
        Ok(projects) => projects,
        Err(e) => {
            log::error!("Error fetching projects: {:#}", e);
            vec![example_project()]
        }
    }
}

/// CLI entry point for `hub list`.
pub async fn run_list(config: &Config, term: Option<&str>, json: bool) -> Result<()> {
    let projects = load_or_example(config).await;
    let results = filter_projects(&projects, term.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", NO_RESULTS);
        return Ok(());
    }

    for project in &results {
        let author = if project.author.is_empty() {
            "(unknown)"
        } else {
            project.author.as_str()
        };
        println!("{:>4}. {}", project.id, project.title);
        println!("      by {}", author);
        if !project.tags.is_empty() {
            println!("      tags: {}", project.tags.join(", "));
        }
    }
    println!();
    println!("{} of {} projects", results.len(), projects.len());

    Ok(())
}
