//! Router tests: drive the HTTP routes in-process against a catalog loaded
//! from a fixed CSV document.

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use project_hub::catalog::{spawn_catalog, CatalogHandle};
use project_hub::config::Config;
use project_hub::server::{router, AppState};
use project_hub::sources::CsvSource;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

struct FixedCsv(&'static str);

#[async_trait]
impl CsvSource for FixedCsv {
    fn describe(&self) -> String {
        "fixed".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

const CSV: &str = "\
Project Title,Author Name,Project Tags,GitHub Repo URL
Solar Tracker,Jane Doe,\"Hardware, Energy\",
Rover,Kim Park,Robotics,https://github.com/kim/rover
";

async fn loaded_app() -> (Router, CatalogHandle) {
    app_with(CSV).await
}

async fn app_with(csv: &'static str) -> (Router, CatalogHandle) {
    let mut catalog = spawn_catalog();
    catalog
        .refresh_from(Arc::new(FixedCsv(csv)))
        .await
        .unwrap();
    catalog.changed().await.unwrap();

    // Background refreshes triggered through the API read a file that does
    // not exist, so they fail fast and leave the loaded list alone.
    let mut config = Config::default();
    config.source.csv_path = Some(PathBuf::from("/nonexistent/projects.csv"));

    let state = AppState::new(Arc::new(config), catalog.clone());
    (router(state), catalog)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn gallery_shows_example_then_ingested() {
    let (app, _) = loaded_app().await;
    let (status, _, html) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let eco = html.find("EcoTrack").unwrap();
    let solar = html.find("Solar Tracker").unwrap();
    let rover = html.find("Rover").unwrap();
    assert!(eco < solar && solar < rover);
}

#[tokio::test]
async fn gallery_filters_by_query() {
    let (app, _) = loaded_app().await;
    let (_, _, html) = get(&app, "/?q=jane").await;

    assert!(html.contains("Solar Tracker"));
    assert!(!html.contains("EcoTrack"));
    assert!(!html.contains("Rover"));
}

#[tokio::test]
async fn gallery_empty_state() {
    let (app, _) = loaded_app().await;
    let (status, _, html) = get(&app, "/?q=quantum").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No projects found matching your search."));
}

#[tokio::test]
async fn submit_redirects_to_form() {
    let (app, _) = loaded_app().await;
    let (status, location, _) = get(&app, "/submit").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.unwrap().starts_with("https://docs.google.com/forms/"));
}

#[tokio::test]
async fn present_link_redirects() {
    let (app, _) = loaded_app().await;
    let (status, location, _) = get(&app, "/projects/2/github").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("https://github.com/kim/rover"));
}

#[tokio::test]
async fn missing_links_show_notices() {
    let (app, _) = loaded_app().await;

    let (status, location, html) = get(&app, "/projects/1/feedback").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(html.contains("No feedback form available for this project."));

    let (_, _, html) = get(&app, "/projects/1/github").await;
    assert!(html.contains("No GitHub repository available for this project."));
}

#[tokio::test]
async fn unknown_project_is_404() {
    let (app, _) = loaded_app().await;

    let (status, _, _) = get(&app, "/projects/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = get(&app, "/api/projects/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn detail_page_disables_missing_actions() {
    let (app, _) = loaded_app().await;
    let (status, _, html) = get(&app, "/projects/1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Submitted on: Date not available"));
    assert!(html.contains("disabled>Provide Feedback</button>"));
    assert!(html.contains("disabled>View on GitHub</button>"));
}

#[tokio::test]
async fn api_lists_filtered_projects() {
    let (app, _) = loaded_app().await;
    let (status, _, body) = get(&app, "/api/projects?q=ROBOT").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], 2);
    assert_eq!(projects[0]["title"], "Rover");
}

#[tokio::test]
async fn api_detail_reports_action_state() {
    let (app, _) = loaded_app().await;
    let (_, _, body) = get(&app, "/api/projects/2").await;

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["title"], "Rover");
    assert_eq!(json["feedbackEnabled"], false);
    assert_eq!(json["githubEnabled"], true);
    assert_eq!(json["submittedOn"], "Date not available");
}

#[tokio::test]
async fn health_counts_projects() {
    let (app, catalog) = loaded_app().await;
    let (_, _, body) = get(&app, "/health").await;

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["projects"], catalog.snapshot().len());
    assert_eq!(json["projects"], 3);
}

#[tokio::test]
async fn unusable_link_shows_notice() {
    let (app, _) = app_with(
        "Project Title,GitHub Repo URL\nBroken,\"https://github.com/a\nb\"\n",
    )
    .await;
    let (status, location, html) = get(&app, "/projects/1/github").await;

    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(html.contains("link could not be opened"));
}

#[tokio::test]
async fn refresh_is_accepted_and_list_stays_readable() {
    let (app, catalog) = loaded_app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let (_, _, html) = get(&app, "/?q=rover").await;
    assert!(html.contains("Rover"));
    assert_eq!(catalog.snapshot().len(), 3);
}
