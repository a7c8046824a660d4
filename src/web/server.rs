use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::service::CatalogService;
use crate::catalog::source::DirectorySource;
use crate::catalog::store::ScoreCatalog;
use crate::cli::ServeArgs;
use crate::core::filter::ScoreFilter;
use crate::core::score::ScoreRecord;

/// Shared application state
pub struct AppState {
    pub service: CatalogService,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Query parameters for the search endpoints
#[derive(Deserialize)]
struct SearchParams {
    /// Substring to search for (case-insensitive)
    q: String,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({error_type}): {internal_msg}");
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server
/// fails to start.
pub fn run(args: ServeArgs, root: PathBuf, extension: String) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, root, extension).await })
}

/// Create the application router with all routes configured.
///
/// The catalog loads lazily on the first request, so building the router
/// performs no storage I/O. Hardening layers (rate limiting, timeouts)
/// are applied by [`run`]; tests drive the bare router directly.
#[must_use]
pub fn create_router(service: CatalogService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/catalog", get(catalog_status_handler))
        .route("/api/scores", get(scores_handler))
        .route("/api/scores/{*path}", get(score_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/composers", get(composers_handler))
        .route("/api/search/title", get(search_title_handler))
        .route("/api/search/composer", get(search_composer_handler))
        .with_state(state)
}

#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
async fn run_server(args: ServeArgs, root: PathBuf, extension: String) -> anyhow::Result<()> {
    let service = CatalogService::new(DirectorySource::new(root, extension));

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(20) // 20 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    // Build router with security layers
    let app = create_router(service).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            // Limit concurrent requests
            .layer(ConcurrencyLimitLayer::new(100))
            // The API is GET-only; reject oversized bodies outright
            .layer(DefaultBodyLimit::max(64 * 1024)),
    );

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting scorebook server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// Load the catalog, mapping a failure to a safe 500 response.
fn load_catalog(state: &AppState) -> Result<Arc<ScoreCatalog>, Box<Response>> {
    state.service.catalog().map_err(|e| {
        Box::new(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(create_safe_error_response(
                    "catalog_load_failed",
                    "Failed to load the score catalog",
                    Some(&e.to_string()),
                )),
            )
                .into_response(),
        )
    })
}

/// Catalog status: where documents come from and when they were loaded
async fn catalog_status_handler(State(state): State<Arc<AppState>>) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    Json(serde_json::json!({
        "source": state.service.describe_source(),
        "count": catalog.len(),
        "loadedAt": catalog.loaded_at().to_rfc3339(),
    }))
    .into_response()
}

/// List scores, optionally filtered by query parameters
async fn scores_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ScoreFilter>,
) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    let scores: Vec<&ScoreRecord> = if filter.is_empty() {
        catalog.all().iter().collect()
    } else {
        catalog.filter(&filter)
    };
    Json(serde_json::json!({
        "count": scores.len(),
        "scores": scores.iter().map(|s| score_summary(s)).collect::<Vec<_>>(),
    }))
    .into_response()
}

/// Fetch a single score by its catalog path
async fn score_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    match catalog.get(&path) {
        Some(score) => Json(score_detail(score)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(create_safe_error_response(
                "not_found",
                "No score found at the requested path",
                None,
            )),
        )
            .into_response(),
    }
}

/// List distinct categories
async fn categories_handler(State(state): State<Arc<AppState>>) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    let categories = catalog.categories();
    Json(serde_json::json!({
        "count": categories.len(),
        "categories": categories,
    }))
    .into_response()
}

/// List distinct composers
async fn composers_handler(State(state): State<Arc<AppState>>) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    let composers = catalog.composers();
    Json(serde_json::json!({
        "count": composers.len(),
        "composers": composers,
    }))
    .into_response()
}

/// Search scores by title substring
async fn search_title_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    let results = catalog.search_by_title(&params.q);
    Json(serde_json::json!({
        "count": results.len(),
        "scores": results.iter().map(|s| score_summary(s)).collect::<Vec<_>>(),
    }))
    .into_response()
}

/// Search scores by composer substring
async fn search_composer_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let catalog = match load_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return *response,
    };

    let results = catalog.search_by_composer(&params.q);
    Json(serde_json::json!({
        "count": results.len(),
        "scores": results.iter().map(|s| score_summary(s)).collect::<Vec<_>>(),
    }))
    .into_response()
}

/// Summary payload for list and search responses
fn score_summary(score: &ScoreRecord) -> serde_json::Value {
    serde_json::json!({
        "path": score.path,
        "filename": score.filename,
        "category": score.category,
        "fullCategory": score.full_category,
        "title": score.title(),
        "composer": score.composer(),
        "timeSignature": score.time_signature(),
        "tempo": score.tempo(),
        "keySignature": score.key_signature(),
    })
}

/// Full payload for single-score responses
fn score_detail(score: &ScoreRecord) -> serde_json::Value {
    serde_json::json!({
        "path": score.path,
        "filename": score.filename,
        "category": score.category,
        "fullCategory": score.full_category,
        "title": score.title(),
        "composer": score.composer(),
        "timeSignature": score.time_signature(),
        "tempo": score.tempo(),
        "keySignature": score.key_signature(),
        "metadata": score.metadata,
        "notation": score.notation,
        "content": score.content,
    })
}
