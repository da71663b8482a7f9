//! HTTP server for the project gallery.
//!
//! Serves the HTML gallery plus a small JSON API over the same catalog.
//! The catalog starts with the example project; one ingestion task is
//! spawned at startup and swaps in the spreadsheet contents when it lands.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Gallery page, filtered by `?q=` |
//! | `GET`  | `/projects/{id}` | Detail page |
//! | `GET`  | `/projects/{id}/feedback` | Redirect to the feedback form, or a notice |
//! | `GET`  | `/projects/{id}/github` | Redirect to the repository, or a notice |
//! | `GET`  | `/submit` | Redirect to the submission form |
//! | `GET`  | `/api/projects` | Filtered records as JSON |
//! | `GET`  | `/api/projects/{id}` | One record with its detail fields |
//! | `POST` | `/api/refresh` | Re-run ingestion in the background |
//! | `GET`  | `/health` | Health check |
//!
//! # Error Contract
//!
//! JSON endpoints report errors as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "project not found: 7" } }
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::{spawn_catalog, CatalogHandle};
use crate::config::Config;
use crate::detail::{find_project, resolve_action, ProjectAction, ProjectDetail};
use crate::models::ProjectRecord;
use crate::render;
use crate::search::filter_projects;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    catalog: CatalogHandle,
}

impl AppState {
    pub fn new(config: Arc<Config>, catalog: CatalogHandle) -> Self {
        Self { config, catalog }
    }
}

/// Starts the server and the startup ingestion.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let config = Arc::new(config.clone());

    let catalog = spawn_catalog();
    // Not awaited: the gallery serves the example until ingestion lands.
    catalog.refresh(config.clone());

    let app = router(AppState::new(config, catalog));

    log::info!("Project hub listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router. Separate from [`run_server`] so tests can drive it
/// without a socket.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_gallery))
        .route("/submit", get(handle_submit))
        .route("/projects/{id}", get(handle_detail_page))
        .route("/projects/{id}/feedback", get(handle_feedback))
        .route("/projects/{id}/github", get(handle_github))
        .route("/api/projects", get(handle_list_projects))
        .route("/api/projects/{id}", get(handle_get_project))
        .route("/api/refresh", post(handle_refresh))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// JSON error that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ HTML pages ============

#[derive(Deserialize, Default)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Handler for `GET /`.
async fn handle_gallery(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let projects = state.catalog.snapshot();
    let results = filter_projects(&projects, &params.q);
    Html(render::render_gallery(&state.config.site, &params.q, &results))
}

/// Handler for `GET /submit`.
async fn handle_submit(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config.links.submission_form_url)
}

/// Handler for `GET /projects/{id}`.
async fn handle_detail_page(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let projects = state.catalog.snapshot();
    match find_project(&projects, id) {
        Some(project) => Html(render::render_detail_page(
            &state.config.site,
            &ProjectDetail::new(project),
        ))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(render::render_notice_page(
                &state.config.site,
                &format!("Project {} was not found.", id),
            )),
        )
            .into_response(),
    }
}

async fn handle_feedback(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    open_action(&state, id, ProjectAction::Feedback)
}

async fn handle_github(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    open_action(&state, id, ProjectAction::Repository)
}

/// Redirects to the project's link, or shows the missing-link notice.
///
/// A missing link is not an error, so the notice is served with `200 OK`.
/// A link that cannot be sent as a `Location` header gets a notice too.
fn open_action(state: &AppState, id: u32, action: ProjectAction) -> Response {
    let projects = state.catalog.snapshot();
    let Some(project) = find_project(&projects, id) else {
        return (
            StatusCode::NOT_FOUND,
            Html(render::render_notice_page(
                &state.config.site,
                &format!("Project {} was not found.", id),
            )),
        )
            .into_response();
    };

    match resolve_action(project, action) {
        Ok(url) if HeaderValue::from_str(url).is_ok() => Redirect::to(url).into_response(),
        Ok(url) => {
            log::warn!(
                "project {} has an unusable {} link: {:?}",
                id,
                action.slug(),
                url
            );
            Html(render::render_notice_page(&state.config.site, UNUSABLE_LINK)).into_response()
        }
        Err(notice) => {
            Html(render::render_notice_page(&state.config.site, &notice.to_string()))
                .into_response()
        }
    }
}

pub const UNUSABLE_LINK: &str = "This project's link could not be opened.";

// ============ JSON API ============

#[derive(Serialize)]
struct ProjectListResponse {
    projects: Vec<ProjectRecord>,
}

/// Handler for `GET /api/projects`.
async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ProjectListResponse> {
    let projects = state.catalog.snapshot();
    let results = filter_projects(&projects, &params.q)
        .into_iter()
        .cloned()
        .collect();
    Json(ProjectListResponse { projects: results })
}

/// Handler for `GET /api/projects/{id}`.
async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ProjectDetail>, AppError> {
    let projects = state.catalog.snapshot();
    let project =
        find_project(&projects, id).ok_or_else(|| not_found(format!("project not found: {}", id)))?;
    Ok(Json(ProjectDetail::new(project)))
}

#[derive(Serialize)]
struct RefreshResponse {
    status: String,
}

/// Handler for `POST /api/refresh`.
///
/// Starts an ingestion and returns immediately; the gallery picks up the new
/// list once it lands.
async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RefreshResponse>), AppError> {
    if state.catalog.is_closed() {
        return Err(internal("catalog task has stopped"));
    }
    state.catalog.refresh(state.config.clone());
    Ok((
        StatusCode::ACCEPTED,
        Json(RefreshResponse {
            status: "refreshing".to_string(),
        }),
    ))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    projects: usize,
}

/// Handler for `GET /health`.
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        projects: state.catalog.snapshot().len(),
    })
}
