//! HTTP routes for the dashboard
//!
//! `/` and `/refresh` always answer with the page; fetch and render failures
//! are shown inline. The chart and font routes answer with an error status
//! instead.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::error::DashboardError;
use crate::page::{PageView, REFRESH_DONE};
use crate::state::{AppState, Phase};

/// Body of `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub phase: Phase,
    pub message: Option<String>,
    pub records: usize,
    pub warnings: usize,
    pub articles: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Create the dashboard router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/refresh", post(refresh))
        .route("/chart.svg", get(chart_svg))
        .route("/chart.png", get(chart_png))
        .route("/fonts/:file", get(font_file))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(dashboard_page(&state, false).await)
}

async fn refresh(State(state): State<AppState>) -> Html<String> {
    info!("Refresh requested");
    state.cache.invalidate().await;
    Html(dashboard_page(&state, true).await)
}

/// Fetch (or reuse) the dataset, render the figure and lay out the page
async fn dashboard_page(state: &AppState, refreshed: bool) -> String {
    let mut view = PageView::new(&state.config.dashboard.title);
    view.fonts = Some(state.fonts.as_ref());
    view.font_error = state.font_error.as_deref();

    let snapshot = match state.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            view.error = Some(format!("データ取得に失敗しました: {}", e));
            return view.render();
        }
    };

    match state.render_svg(snapshot.clone()).await {
        Ok(svg) => {
            view.chart_svg = Some(svg);
            if refreshed {
                view.notice = Some(REFRESH_DONE);
            }
        }
        Err(e) => view.error = Some(format!("グラフ描画に失敗しました: {}", e)),
    }

    view.snapshot = Some(snapshot.as_ref());
    view.render()
}

async fn chart_svg(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let snapshot = state.snapshot().await?;
    let svg = state.render_svg(snapshot).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")], svg).into_response())
}

async fn chart_png(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let snapshot = state.snapshot().await?;
    let png = state.render_png(snapshot).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"expo_attendance.png\""),
        ],
        png,
    )
        .into_response())
}

async fn font_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, DashboardError> {
    let path = state
        .fonts
        .resolve(&file)
        .ok_or_else(|| DashboardError::NotFound(file.clone()))?;

    debug!(%file, "Serving font");
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DashboardError::Render(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "font/ttf"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
        .into_response())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.status();
    let snapshot = state.cache.peek().await;

    Json(HealthResponse {
        phase: status.phase,
        message: status.message.clone(),
        records: snapshot.as_ref().map_or(0, |s| s.table.len()),
        warnings: snapshot.as_ref().map_or(0, |s| s.warnings.len()),
        articles: snapshot.as_ref().map_or(0, |s| s.articles),
        fetched_at: snapshot.as_ref().map(|s| s.fetched_at),
        updated_at: status.updated_at,
    })
}
