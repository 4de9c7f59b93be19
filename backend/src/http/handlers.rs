//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for the actual analysis.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::dto::{
    ChartData, ChartListResponse, DatasetResponse, HealthResponse, InsightsQuery, InsightsReport,
};
use super::error::AppError;
use super::state::{AppState, LoadedAudit};
use crate::error::AuditError;
use crate::services::charts::{build_chart, chart_options, ChartKind};
use crate::services::dataset::AuditDataset;
use crate::services::insights::build_insights;
use crate::services::presentation::{render_chart, VegaLiteRenderer};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn require_dataset(state: &AppState) -> Result<LoadedAudit, AppError> {
    state
        .current_dataset()
        .ok_or_else(|| AppError::from(AuditError::NoDataset))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        dataset_loaded: state.current_dataset().is_some(),
    }))
}

// =============================================================================
// Audit loading
// =============================================================================

/// POST /v1/audits
///
/// Load an audit CSV (raw request body) and make it the current dataset.
pub async fn upload_audit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DatasetResponse>), AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest(
            "Request body must contain an audit CSV file".to_string(),
        ));
    }

    let zero_timestamp = state.config.metrics.zero_timestamp;

    // Parsing and grouping a large export is CPU-bound
    let dataset = tokio::task::spawn_blocking(move || {
        AuditDataset::from_csv_bytes(&body, zero_timestamp)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let loaded = state.replace_dataset(dataset);
    let response = DatasetResponse::from(&loaded);
    info!(
        dataset_id = %loaded.id,
        events = response.summary.included_events,
        submissions = response.summary.submission_count,
        "Audit dataset loaded"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/audits/current
pub async fn current_audit(State(state): State<AppState>) -> HandlerResult<DatasetResponse> {
    let loaded = require_dataset(&state)?;
    Ok(Json(DatasetResponse::from(&loaded)))
}

// =============================================================================
// Charts
// =============================================================================

/// GET /v1/charts
///
/// List the chart kinds the frontend can offer.
pub async fn list_charts() -> HandlerResult<ChartListResponse> {
    let charts = chart_options();
    let total = charts.len();
    Ok(Json(ChartListResponse { charts, total }))
}

/// GET /v1/charts/{kind}
pub async fn get_chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> HandlerResult<ChartData> {
    let kind: ChartKind = kind.parse()?;
    let loaded = require_dataset(&state)?;
    Ok(Json(build_chart(&loaded.dataset, kind)))
}

/// GET /v1/charts/{kind}/vega-lite
///
/// Same chart as a ready-to-embed Vega-Lite specification.
pub async fn get_chart_spec(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> HandlerResult<serde_json::Value> {
    let kind: ChartKind = kind.parse()?;
    let loaded = require_dataset(&state)?;
    let chart = build_chart(&loaded.dataset, kind);
    Ok(Json(render_chart(&VegaLiteRenderer, &chart)))
}

// =============================================================================
// Insights
// =============================================================================

/// GET /v1/insights
pub async fn get_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> HandlerResult<InsightsReport> {
    let thresholds = query
        .thresholds(state.config.insight_thresholds())
        .map_err(AppError::BadRequest)?;
    let loaded = require_dataset(&state)?;
    Ok(Json(build_insights(&loaded.dataset, thresholds)))
}
