//! Core data model: the project record shown in the gallery.
//!
//! Records are built once, either from a spreadsheet row during ingestion or
//! as the built-in example, and never mutated afterwards.

use chrono::Local;
use serde::Serialize;
use std::sync::LazyLock;

/// Timestamp layout used by the spreadsheet's `Timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Captured on first use and shared by every copy of the example.
static EXAMPLE_TIMESTAMP: LazyLock<String> =
    LazyLock::new(|| Local::now().format(TIMESTAMP_FORMAT).to_string());

/// A normalized project entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Position in the current list. The example is always 0; ingested rows
    /// are numbered from 1 in source order.
    pub id: u32,
    pub title: String,
    pub description: String,
    pub author: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub feedback_form_url: Option<String>,
    pub github_repo_url: Option<String>,
    /// Raw `dd/MM/yyyy HH:mm:ss` text; formatted only when displayed.
    pub timestamp: Option<String>,
}

/// The hard-coded example that always heads the list.
///
/// Its timestamp is the moment the example was first built in this process,
/// written in the same layout the spreadsheet uses so it formats like any
/// other record.
pub fn example_project() -> ProjectRecord {
    ProjectRecord {
        id: 0,
        title: "EcoTrack: Campus Sustainability Monitor".to_string(),
        description: "EcoTrack is an IoT-based system that monitors and visualizes real-time \
            energy consumption, waste management, and carbon emissions across our college \
            campus. It uses a network of sensors to collect data, which is then processed and \
            displayed on an interactive dashboard. The project aims to raise awareness about \
            sustainability and drive behavioral changes among students and staff."
            .to_string(),
        author: "Alex Chen".to_string(),
        image_url: Some(
            "https://images.unsplash.com/photo-1518640467707-6811f4a6ab73?ixlib=rb-4.0.3&auto=format&fit=crop&w=2340&q=80"
                .to_string(),
        ),
        tags: vec![
            "IoT".to_string(),
            "Sustainability".to_string(),
            "Data Visualization".to_string(),
        ],
        feedback_form_url: Some("https://forms.gle/exampleFeedbackForm".to_string()),
        github_repo_url: Some("https://github.com/example/ecotrack".to_string()),
        timestamp: Some(EXAMPLE_TIMESTAMP.clone()),
    }
}
