//! HTTP surface for the dashboard
//!
//! `GET /` renders the page; query parameters `min`, `max` and `filler`
//! become filter events (filler first). `/api/view` returns the same view
//! as JSON and `/api/event` accepts one tagged `FilterEvent`.
//!
//! Passes hold the dashboard lock and run on the blocking pool, so a long
//! recomputation never occupies an async worker.

use super::controller::{Dashboard, DashboardError, DashboardView};
use super::page::render_page;
use super::state::FilterEvent;
use crate::episode::EpisodeRange;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

/// Shared server state
pub struct AppState {
    dashboard: Mutex<Dashboard>,
    frame_height: String,
}

impl AppState {
    pub fn new(dashboard: Dashboard, frame_height: impl Into<String>) -> Self {
        Self {
            dashboard: Mutex::new(dashboard),
            frame_height: frame_height.into(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Dashboard> {
        // The view is swapped in whole, so a poisoned lock still holds a consistent one
        self.dashboard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Filter controls as submitted by the page form
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub filler: Option<bool>,
}

impl FilterQuery {
    /// Range event for the submitted bounds. A missing bound keeps the
    /// corresponding bound of `current`.
    pub fn range_event(&self, current: EpisodeRange) -> Option<FilterEvent> {
        if self.min.is_none() && self.max.is_none() {
            return None;
        }
        Some(FilterEvent::range(
            self.min.unwrap_or(current.min),
            self.max.unwrap_or(current.max),
        ))
    }
}

/// Build the router over `state`
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/view", get(api_view))
        .route("/api/event", post(api_event))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            },
        ))
}

/// Bind `addr` and serve until the process exits
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);
    info!("dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

// --- Handlers ---

async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Response {
    let pass_state = state.clone();
    match tokio::task::spawn_blocking(move || apply_query(&pass_state, &params)).await {
        Ok((view, notice)) => {
            Html(render_page(&view, &state.frame_height, notice.as_deref())).into_response()
        }
        Err(e) => pass_failed(e),
    }
}

async fn api_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Response {
    match tokio::task::spawn_blocking(move || apply_query(&state, &params)).await {
        Ok((view, None)) => Json(view).into_response(),
        Ok((_, Some(error))) => rejected(error),
        Err(e) => pass_failed(e),
    }
}

async fn api_event(State(state): State<Arc<AppState>>, Json(event): Json<FilterEvent>) -> Response {
    match tokio::task::spawn_blocking(move || apply_event(&state, event)).await {
        Ok(Ok(view)) => Json(view).into_response(),
        Ok(Err(e)) => {
            warn!(error = %e, ?event, "filter event rejected");
            rejected(e.to_string())
        }
        Err(e) => pass_failed(e),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Apply the query's events under the lock and snapshot the resulting view.
/// Returns the rejection message of the first failing event, if any.
fn apply_query(state: &AppState, params: &FilterQuery) -> (DashboardView, Option<String>) {
    let mut dashboard = state.lock();
    let notice = apply_events(&mut dashboard, params)
        .err()
        .map(|e| {
            warn!(error = %e, ?params, "filter change rejected");
            e.to_string()
        });
    (dashboard.view().clone(), notice)
}

fn apply_events(dashboard: &mut Dashboard, params: &FilterQuery) -> Result<(), DashboardError> {
    if let Some(include) = params.filler {
        dashboard.apply(FilterEvent::include_filler(include))?;
    }
    // Read after the filler event so a rebound range is the fallback
    if let Some(event) = params.range_event(dashboard.filter().range) {
        dashboard.apply(event)?;
    }
    Ok(())
}

fn apply_event(state: &AppState, event: FilterEvent) -> Result<DashboardView, DashboardError> {
    let mut dashboard = state.lock();
    dashboard.apply(event).cloned()
}

fn pass_failed(error: tokio::task::JoinError) -> Response {
    error!(error = %error, "recomputation pass did not complete");
    (StatusCode::INTERNAL_SERVER_ERROR, "recomputation failed").into_response()
}

fn rejected(error: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": error })),
    )
        .into_response()
}
