use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::export::{to_csv, ExportEnvelope, ExportFormat};
use crate::route::{
    assemble, build_route, compute_statistics, MissionFilter, ReportData, RouteStatistics,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::telemetry::MissionQuery;
use crate::web::server::AppState;

/// One snapshot read, then pure computation: fetch, build, aggregate,
/// assemble.
pub async fn load_report(state: &AppState, filter: &MissionFilter) -> ApiResult<ReportData> {
    let (samples, waypoints) = {
        let store = state.store.lock().await;
        (store.samples(filter)?, store.waypoints(filter)?)
    };
    let route = build_route(&samples, &waypoints);
    let statistics = compute_statistics(&route);
    Ok(assemble(filter, route, statistics, &state.config.style))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub status: String,
    pub mission_id: String,
    pub statistics: RouteStatistics,
}

#[utoipa::path(
    get,
    path = "/api/report/analysis",
    tag = "report",
    params(
        ("mission_id" = Option<String>, Query, description = "Restrict to one mission")
    ),
    responses(
        (status = 200, description = "Route statistics", body = AnalysisResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn analysis(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MissionFilter::from_param(query.mission_id);
    let report = load_report(&state, &filter).await?;
    Ok(Json(AnalysisResponse {
        status: "ok".to_string(),
        mission_id: report.mission_id,
        statistics: report.statistics,
    }))
}

#[utoipa::path(
    get,
    path = "/api/report/data",
    tag = "report",
    params(
        ("mission_id" = Option<String>, Query, description = "Restrict to one mission")
    ),
    responses(
        (status = 200, description = "Full report data", body = ReportData),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn report_data(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MissionFilter::from_param(query.mission_id);
    let report = load_report(&state, &filter).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportQuery {
    #[serde(default)]
    pub mission_id: Option<String>,
    #[serde(default)]
    pub format: ExportFormat,
}

#[utoipa::path(
    get,
    path = "/api/report/export",
    tag = "report",
    params(
        ("mission_id" = Option<String>, Query, description = "Restrict to one mission"),
        ("format" = Option<String>, Query, description = "Export format: json (default) or csv")
    ),
    responses(
        (status = 200, description = "Mission data export", body = ExportEnvelope),
        (status = 500, description = "Storage or export error", body = ErrorResponse)
    )
)]
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let filter = MissionFilter::from_param(query.mission_id);
    let report = load_report(&state, &filter).await?;

    match query.format {
        ExportFormat::Json => Ok(Json(ExportEnvelope::new(report)).into_response()),
        ExportFormat::Csv => {
            let csv = to_csv(&report)?;
            Ok(([(header::CONTENT_TYPE, "text/csv")], csv).into_response())
        }
    }
}
