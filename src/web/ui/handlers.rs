use axum::extract::{Query, State};

use crate::route::{MissionFilter, PointKind, ReportData};
use crate::web::api::error::ApiResult;
use crate::web::api::report::load_report;
use crate::web::api::telemetry::MissionQuery;
use crate::web::server::AppState;

use super::templates::{ReportTemplate, SegmentRow, WaypointRow};

pub async fn report_page(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<ReportTemplate> {
    let filter = MissionFilter::from_param(query.mission_id);
    let report = load_report(&state, &filter).await?;
    Ok(render_view(report))
}

fn render_view(report: ReportData) -> ReportTemplate {
    let stats = &report.statistics;

    let waypoints = report
        .points
        .iter()
        .filter(|p| p.point.kind == PointKind::Waypoint)
        .map(|p| WaypointRow {
            name: p.point.name.clone().unwrap_or_default(),
            bucket: p.style.bucket.clone(),
            color: p.style.color.clone(),
            coordinates: p
                .point
                .position
                .map(|pos| format!("({:.6}, {:.6})", pos.latitude_deg, pos.longitude_deg))
                .unwrap_or_else(|| "unknown".to_string()),
            time: p.point.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            description: p.point.note.clone().unwrap_or_default(),
        })
        .collect();

    let segments = report
        .segments
        .iter()
        .map(|s| SegmentRow {
            index: s.from_index + 1,
            distance: fmt_opt(s.distance_m, " m"),
            speed: fmt_opt(s.speed_m_s, " m/s"),
            bucket: s.style.bucket.clone(),
            color: s.style.color.clone(),
        })
        .collect();

    ReportTemplate {
        mission_id: report.mission_id,
        total_distance_km: format!("{:.3}", stats.total_distance_m / 1000.0),
        average_speed: fmt_opt(stats.average_speed_m_s, " m/s"),
        max_speed: fmt_opt(stats.max_speed_m_s, " m/s"),
        duration_s: format!("{:.0}", stats.total_duration_s),
        battery_start: fmt_opt(stats.battery_start_pct, "%"),
        battery_end: fmt_opt(stats.battery_end_pct, "%"),
        battery_consumed: fmt_opt(stats.battery_consumed_pct, "%"),
        avg_temperature: fmt_opt(stats.temperature_c.map(|r| r.average), "°C"),
        avg_humidity: fmt_opt(stats.humidity_pct.map(|r| r.average), "%"),
        sample_count: stats.sample_count,
        waypoint_count: stats.waypoint_count,
        waypoints,
        segments,
    }
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => "N/A".to_string(),
    }
}
