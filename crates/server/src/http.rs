//! HTTP Endpoints
//!
//! The HTML form page, the JSON API, and the operational endpoints.

use axum::{
    extract::{Form, Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use finquery_core::QueryReport;

use crate::pages::render_index;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.get_config();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    drop(config); // Release lock before building router

    Router::new()
        // Form page
        .route("/", get(index_page))
        .route("/calculate", post(calculate_form))
        // JSON API
        .route("/api/query", post(api_query))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin endpoints
        .route("/admin/reload-config", post(reload_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().expect("static origin"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// The query form page
async fn index_page() -> Html<String> {
    Html(render_index("", "", ""))
}

/// Form submission from the query page
#[derive(Debug, Deserialize)]
struct CalculateForm {
    #[serde(default)]
    query: String,
}

/// Handle the form post: run the query and re-render the page with the
/// result and the calculation trace.
async fn calculate_form(
    State(state): State<AppState>,
    Form(form): Form<CalculateForm>,
) -> Html<String> {
    let query = form.query.trim();
    if query.is_empty() {
        return Html(render_index("", "Error: No query provided.", ""));
    }

    let report = state.dispatcher.process(query).await;
    Html(render_index(query, report.display_text(), &report.details))
}

/// JSON query request
#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
}

/// JSON query response
#[derive(Debug, Serialize)]
struct QueryResponse {
    #[serde(flatten)]
    report: QueryReport,
}

/// JSON API endpoint
async fn api_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, StatusCode> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let report = state.dispatcher.process(query).await;
    Ok(Json(QueryResponse { report }))
}

/// Health check: process-level liveness plus intent table sanity.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let intent_count = state.intents.intents.len();
    let healthy = intent_count == 5;

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if healthy { "healthy" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "intents": { "status": if healthy { "ok" } else { "degraded" }, "count": intent_count },
            }
        })),
    )
}

/// Readiness check: probes both inference sidecars with a bounded timeout.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let probe = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        state.dispatcher.backends_available(),
    )
    .await;

    let (classifier_ok, qa_ok) = probe.unwrap_or((false, false));
    let ready = classifier_ok && qa_ok;

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "classifier_sidecar": { "status": if classifier_ok { "ok" } else { "unreachable" } },
                "qa_sidecar": { "status": if qa_ok { "ok" } else { "unreachable" } },
            }
        })),
    )
}

/// Prometheus exposition endpoint
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed\n".to_string(),
        ),
    }
}

/// Config reload endpoint
///
/// POST /admin/reload-config
///
/// Reloads configuration from disk. Sidecar bindings and the intent table
/// keep their startup values; see `AppState::reload_config`.
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully"
            })),
        ),
        Err(e) => {
            tracing::error!("Config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e
                })),
            )
        }
    }
}
