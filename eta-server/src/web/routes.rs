//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::board::LookupOutcome;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/eta", get(eta_board))
        .route("/api/stations", get(list_stations))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the station form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = IndexTemplate::new(state.lookups.directory())
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

/// Every station, for client-side autocomplete.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let stations = state
        .lookups
        .directory()
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationListResponse { stations })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Arrival board for one station.
///
/// Per-line failures do not fail the request; they are reported in the
/// body. Only an unresolvable query is a 404.
async fn eta_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<EtaRequest>,
) -> Result<Response, AppError> {
    let report = state.lookups.lookup(&req.station).await;

    let status = match report.outcome {
        LookupOutcome::Unresolved(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };

    if accepts_html(&headers) {
        let template = BoardTemplate {
            board: BoardView::from_report(&report),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        // htmx skips swapping 4xx bodies, so the banner goes out as 200.
        return Ok(Html(html).into_response());
    }

    Ok((status, Json(LookupResponse::from_report(&report))).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
