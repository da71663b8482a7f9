//! Project detail view and the per-project external actions.
//!
//! Used by `hub show` and by the detail panels of the web gallery.

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::{ProjectRecord, TIMESTAMP_FORMAT};
use crate::search::load_or_example;

pub const DATE_NOT_AVAILABLE: &str = "Date not available";
pub const INVALID_DATE: &str = "Invalid date";

/// Formats a raw spreadsheet timestamp for display.
///
/// `"29/04/2023 13:00:00"` becomes `"April 29th, 2023 at 1:00 PM"`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return DATE_NOT_AVAILABLE.to_string();
    };

    match NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT) {
        Ok(dt) => format!(
            "{} {}{}, {} at {}",
            dt.format("%B"),
            dt.day(),
            ordinal_suffix(dt.day()),
            dt.year(),
            dt.format("%-I:%M %p")
        ),
        Err(_) => INVALID_DATE.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// External links a project may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Feedback,
    Repository,
}

impl ProjectAction {
    pub fn label(self) -> &'static str {
        match self {
            ProjectAction::Feedback => "Provide Feedback",
            ProjectAction::Repository => "View on GitHub",
        }
    }

    /// Path segment under `/projects/{id}/`.
    pub fn slug(self) -> &'static str {
        match self {
            ProjectAction::Feedback => "feedback",
            ProjectAction::Repository => "github",
        }
    }

    fn url(self, record: &ProjectRecord) -> Option<&str> {
        match self {
            ProjectAction::Feedback => record.feedback_form_url.as_deref(),
            ProjectAction::Repository => record.github_repo_url.as_deref(),
        }
    }
}

/// Notice raised when an action is forced on a project that lacks its link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingLink {
    #[error("No feedback form available for this project.")]
    FeedbackForm,
    #[error("No GitHub repository available for this project.")]
    Repository,
}

/// Returns the URL to open for `action`, or the notice to show instead.
pub fn resolve_action(record: &ProjectRecord, action: ProjectAction) -> Result<&str, MissingLink> {
    action.url(record).ok_or(match action {
        ProjectAction::Feedback => MissingLink::FeedbackForm,
        ProjectAction::Repository => MissingLink::Repository,
    })
}

/// Everything the detail panel shows for one project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectRecord,
    pub submitted_on: String,
    pub feedback_enabled: bool,
    pub github_enabled: bool,
}

impl ProjectDetail {
    pub fn new(project: &ProjectRecord) -> Self {
        Self {
            submitted_on: format_timestamp(project.timestamp.as_deref()),
            feedback_enabled: project.feedback_form_url.is_some(),
            github_enabled: project.github_repo_url.is_some(),
            project: project.clone(),
        }
    }

    pub fn is_enabled(&self, action: ProjectAction) -> bool {
        match action {
            ProjectAction::Feedback => self.feedback_enabled,
            ProjectAction::Repository => self.github_enabled,
        }
    }
}

pub fn find_project(projects: &[ProjectRecord], id: u32) -> Option<&ProjectRecord> {
    projects.iter().find(|p| p.id == id)
}

/// CLI entry point for `hub show`.
pub async fn run_show(config: &Config, id: u32) -> Result<()> {
    let projects = load_or_example(config).await;
    let Some(project) = find_project(&projects, id) else {
        bail!("project not found: {}", id);
    };
    let detail = ProjectDetail::new(project);

    println!("--- Project {} ---", project.id);
    println!("title:         {}", project.title);
    println!("author:        {}", project.author);
    if let Some(ref url) = project.image_url {
        println!("image:         {}", url);
    }
    if !project.tags.is_empty() {
        println!("tags:          {}", project.tags.join(", "));
    }
    println!("submitted on:  {}", detail.submitted_on);
    println!();

    println!("--- Description ---");
    println!("{}", project.description);
    println!();

    println!("--- Actions ---");
    for action in [ProjectAction::Feedback, ProjectAction::Repository] {
        match resolve_action(project, action) {
            Ok(url) => println!("{:<18} {}", action.label(), url),
            Err(notice) => println!("{:<18} (disabled) {}", action.label(), notice),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::example_project;

    fn bare(id: u32) -> ProjectRecord {
        ProjectRecord {
            id,
            title: "Solar Tracker".to_string(),
            description: String::new(),
            author: "Jane Doe".to_string(),
            image_url: None,
            tags: vec![],
            feedback_form_url: None,
            github_repo_url: None,
            timestamp: None,
        }
    }

    #[test]
    fn formats_valid_timestamp() {
        assert_eq!(
            format_timestamp(Some("29/04/2023 13:00:00")),
            "April 29th, 2023 at 1:00 PM"
        );
        assert_eq!(
            format_timestamp(Some("01/12/2024 00:05:00")),
            "December 1st, 2024 at 12:05 AM"
        );
    }

    #[test]
    fn invalid_and_missing_timestamps_use_placeholders() {
        assert_eq!(format_timestamp(Some("not-a-date")), "Invalid date");
        assert_eq!(format_timestamp(Some("31/02/2023 10:00:00")), "Invalid date");
        assert_eq!(format_timestamp(None), "Date not available");
    }

    #[test]
    fn ordinal_suffixes() {
        let got: Vec<&str> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 30]
            .iter()
            .map(|d| ordinal_suffix(*d))
            .collect();
        assert_eq!(
            got,
            vec!["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "th"]
        );
    }

    #[test]
    fn missing_links_produce_notices() {
        let record = bare(1);
        assert_eq!(
            resolve_action(&record, ProjectAction::Feedback)
                .unwrap_err()
                .to_string(),
            "No feedback form available for this project."
        );
        assert_eq!(
            resolve_action(&record, ProjectAction::Repository)
                .unwrap_err()
                .to_string(),
            "No GitHub repository available for this project."
        );
    }

    #[test]
    fn present_links_resolve() {
        let example = example_project();
        assert_eq!(
            resolve_action(&example, ProjectAction::Feedback),
            Ok("https://forms.gle/exampleFeedbackForm")
        );
        assert_eq!(
            resolve_action(&example, ProjectAction::Repository),
            Ok("https://github.com/example/ecotrack")
        );
    }

    #[test]
    fn detail_gates_actions() {
        let mut record = bare(3);
        record.github_repo_url = Some("https://github.com/jane/solar".to_string());
        let detail = ProjectDetail::new(&record);
        assert!(!detail.is_enabled(ProjectAction::Feedback));
        assert!(detail.is_enabled(ProjectAction::Repository));
        assert_eq!(detail.submitted_on, DATE_NOT_AVAILABLE);
    }

    #[test]
    fn example_timestamp_formats() {
        let detail = ProjectDetail::new(&example_project());
        assert_ne!(detail.submitted_on, INVALID_DATE);
        assert_ne!(detail.submitted_on, DATE_NOT_AVAILABLE);
    }

    #[test]
    fn find_by_id() {
        let projects = vec![example_project(), bare(1)];
        assert_eq!(find_project(&projects, 1).unwrap().title, "Solar Tracker");
        assert!(find_project(&projects, 9).is_none());
    }
}
