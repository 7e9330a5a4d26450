use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A point on the surface, WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl Position {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m: None,
        }
    }

    pub fn in_range(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }
}

/// Wrap a compass heading into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// One capture event: position plus whatever telemetry the rover reported
/// at that moment. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocatedSample {
    pub timestamp: DateTime<Utc>,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    pub mission_id: String,
    pub rover_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_file: Option<String>,
}

/// A manually or automatically marked location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub position: Position,
    pub mission_id: String,
    pub rover_id: String,
    pub auto_generated: bool,
    pub timestamp: DateTime<Utc>,
}

/// Mission scoping for store queries. `All` is an explicit sentinel rather
/// than an absent or empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionFilter {
    All,
    Mission(String),
}

impl MissionFilter {
    pub fn from_param(param: Option<String>) -> Self {
        match param {
            Some(id) if !id.is_empty() => MissionFilter::Mission(id),
            _ => MissionFilter::All,
        }
    }

    pub fn matches(&self, mission_id: &str) -> bool {
        match self {
            MissionFilter::All => true,
            MissionFilter::Mission(id) => id == mission_id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MissionFilter::All => "all_missions",
            MissionFilter::Mission(id) => id,
        }
    }
}

/// Ordering priority for same-timestamp points: captures sort before
/// waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Capture,
    Waypoint,
}

/// A capture sample or waypoint projected into the shape route traversal
/// works with. Telemetry fields are only ever set for capture points;
/// waypoints carry position and timestamp alone.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RoutePoint {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub kind: PointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
}

/// min/max/average over the points that carry a given reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RangeSummary {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Aggregate result over a built route. Speed, battery and environmental
/// fields are `None` when no point carried the reading.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RouteStatistics {
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed_m_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed_m_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_speed_m_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_start_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_end_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_consumed_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<RangeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<RangeSummary>,
    pub sample_count: usize,
    pub waypoint_count: usize,
}

impl RouteStatistics {
    /// Statistics of a route with no traversable segments.
    pub fn empty(sample_count: usize, waypoint_count: usize) -> Self {
        Self {
            total_distance_m: 0.0,
            total_duration_s: 0.0,
            average_speed_m_s: None,
            max_speed_m_s: None,
            min_speed_m_s: None,
            battery_start_pct: None,
            battery_end_pct: None,
            battery_consumed_pct: None,
            temperature_c: None,
            humidity_pct: None,
            sample_count,
            waypoint_count,
        }
    }
}
