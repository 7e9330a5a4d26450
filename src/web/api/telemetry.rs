use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::route::{normalize_heading, LocatedSample, MissionFilter, Position, Waypoint};
use crate::store::NewWaypoint;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MissionQuery {
    #[serde(default)]
    pub mission_id: Option<String>,
}

/// Coordinate and telemetry range checks happen here, at ingestion; the
/// analysis core trusts stored records.
fn validate_sample(sample: &LocatedSample) -> Result<(), String> {
    validate_position(&sample.position)?;
    if sample.mission_id.is_empty() {
        return Err("mission_id must not be empty".to_string());
    }
    if let Some(speed) = sample.speed_m_s {
        if !speed.is_finite() || speed < 0.0 {
            return Err(format!("invalid speed: {speed}"));
        }
    }
    if let Some(level) = sample.battery_level {
        if !level.is_finite() || !(0.0..=100.0).contains(&level) {
            return Err(format!("invalid battery level: {level}"));
        }
    }
    Ok(())
}

fn validate_position(position: &Position) -> Result<(), String> {
    if !position.in_range() {
        return Err(format!(
            "coordinates out of range: ({}, {})",
            position.latitude_deg, position.longitude_deg
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleResponse {
    pub status: String,
    pub sample: LocatedSample,
}

#[utoipa::path(
    post,
    path = "/api/telemetry/sample",
    tag = "telemetry",
    request_body = LocatedSample,
    responses(
        (status = 201, description = "Sample recorded", body = SampleResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn submit_sample(
    State(state): State<AppState>,
    Json(mut sample): Json<LocatedSample>,
) -> ApiResult<impl IntoResponse> {
    validate_sample(&sample).map_err(ApiError::Validation)?;
    sample.heading_deg = sample.heading_deg.map(normalize_heading);

    let store = state.store.lock().await;
    store.append_sample(sample.clone())?;
    info!("recorded sample for mission {}", sample.mission_id);

    Ok((
        StatusCode::CREATED,
        Json(SampleResponse {
            status: "ok".to_string(),
            sample,
        }),
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WaypointSubmission {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: Option<f64>,
    pub mission_id: String,
    #[serde(default = "default_rover")]
    pub rover_id: String,
    #[serde(default)]
    pub auto_generated: bool,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_rover() -> String {
    "rover_001".to_string()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WaypointResponse {
    pub status: String,
    pub waypoint: Waypoint,
}

#[utoipa::path(
    post,
    path = "/api/telemetry/waypoint",
    tag = "telemetry",
    request_body = WaypointSubmission,
    responses(
        (status = 201, description = "Waypoint recorded", body = WaypointResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn submit_waypoint(
    State(state): State<AppState>,
    Json(submission): Json<WaypointSubmission>,
) -> ApiResult<impl IntoResponse> {
    if submission.name.is_empty() {
        return Err(ApiError::Validation("waypoint name is required".to_string()));
    }
    if submission.mission_id.is_empty() {
        return Err(ApiError::Validation("mission_id must not be empty".to_string()));
    }
    let position = Position {
        latitude_deg: submission.latitude_deg,
        longitude_deg: submission.longitude_deg,
        altitude_m: submission.altitude_m,
    };
    validate_position(&position).map_err(ApiError::Validation)?;

    let store = state.store.lock().await;
    let waypoint = store.append_waypoint(NewWaypoint {
        name: submission.name,
        category: submission.category,
        description: submission.description,
        position,
        mission_id: submission.mission_id,
        rover_id: submission.rover_id,
        auto_generated: submission.auto_generated,
        timestamp: Utc::now(),
    })?;
    info!("recorded waypoint {} ({})", waypoint.id, waypoint.name);

    Ok((
        StatusCode::CREATED,
        Json(WaypointResponse {
            status: "ok".to_string(),
            waypoint,
        }),
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AutoWaypointRequest {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: Option<f64>,
    pub mission_id: String,
    #[serde(default = "default_rover")]
    pub rover_id: String,
}

#[utoipa::path(
    post,
    path = "/api/telemetry/waypoint/auto",
    tag = "telemetry",
    request_body = AutoWaypointRequest,
    responses(
        (status = 201, description = "Auto waypoint recorded", body = WaypointResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn auto_waypoint(
    State(state): State<AppState>,
    Json(request): Json<AutoWaypointRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.mission_id.is_empty() {
        return Err(ApiError::Validation("mission_id must not be empty".to_string()));
    }
    let position = Position {
        latitude_deg: request.latitude_deg,
        longitude_deg: request.longitude_deg,
        altitude_m: request.altitude_m,
    };
    validate_position(&position).map_err(ApiError::Validation)?;

    let store = state.store.lock().await;
    let name = store.next_auto_name(&request.mission_id)?;
    let waypoint = store.append_waypoint(NewWaypoint {
        name,
        category: "auto".to_string(),
        description: format!(
            "Automatically generated waypoint during {}",
            request.mission_id
        ),
        position,
        mission_id: request.mission_id,
        rover_id: request.rover_id,
        auto_generated: true,
        timestamp: Utc::now(),
    })?;
    info!("recorded auto waypoint {}", waypoint.id);

    Ok((
        StatusCode::CREATED,
        Json(WaypointResponse {
            status: "ok".to_string(),
            waypoint,
        }),
    ))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleListResponse {
    pub status: String,
    pub count: usize,
    pub samples: Vec<LocatedSample>,
}

#[utoipa::path(
    get,
    path = "/api/telemetry/samples",
    tag = "telemetry",
    params(
        ("mission_id" = Option<String>, Query, description = "Restrict to one mission")
    ),
    responses(
        (status = 200, description = "Stored samples in insertion order", body = SampleListResponse)
    )
)]
pub async fn list_samples(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MissionFilter::from_param(query.mission_id);
    let store = state.store.lock().await;
    let samples = store.samples(&filter)?;
    Ok(Json(SampleListResponse {
        status: "ok".to_string(),
        count: samples.len(),
        samples,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WaypointListResponse {
    pub status: String,
    pub count: usize,
    pub waypoints: Vec<Waypoint>,
}

#[utoipa::path(
    get,
    path = "/api/telemetry/waypoints",
    tag = "telemetry",
    params(
        ("mission_id" = Option<String>, Query, description = "Restrict to one mission")
    ),
    responses(
        (status = 200, description = "Stored waypoints in insertion order", body = WaypointListResponse)
    )
)]
pub async fn list_waypoints(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MissionFilter::from_param(query.mission_id);
    let store = state.store.lock().await;
    let waypoints = store.waypoints(&filter)?;
    Ok(Json(WaypointListResponse {
        status: "ok".to_string(),
        count: waypoints.len(),
        waypoints,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> LocatedSample {
        LocatedSample {
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            position: Position::new(37.0, -122.0),
            heading_deg: None,
            speed_m_s: None,
            battery_level: None,
            temperature_c: None,
            humidity_pct: None,
            mission_id: "m1".into(),
            rover_id: "rover_001".into(),
            note: None,
            photo_file: None,
        }
    }

    #[test]
    fn in_range_sample_passes() {
        assert!(validate_sample(&sample()).is_ok());
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let mut s = sample();
        s.position.latitude_deg = 91.0;
        assert!(validate_sample(&s).is_err());
    }

    #[test]
    fn negative_speed_rejected() {
        let mut s = sample();
        s.speed_m_s = Some(-1.0);
        assert!(validate_sample(&s).is_err());
    }

    #[test]
    fn battery_over_100_rejected() {
        let mut s = sample();
        s.battery_level = Some(100.5);
        assert!(validate_sample(&s).is_err());
    }

    #[test]
    fn empty_mission_rejected() {
        let mut s = sample();
        s.mission_id = String::new();
        assert!(validate_sample(&s).is_err());
    }
}
