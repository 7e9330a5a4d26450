use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::route::{PointKind, ReportData};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV write error: {0}")]
    Finish(String),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

/// JSON export wrapper. The timestamp lives here, not in `ReportData`,
/// so assembly itself stays deterministic.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExportEnvelope {
    pub mission_id: String,
    pub export_timestamp: DateTime<Utc>,
    pub report: ReportData,
}

impl ExportEnvelope {
    pub fn new(report: ReportData) -> Self {
        Self {
            mission_id: report.mission_id.clone(),
            export_timestamp: Utc::now(),
            report,
        }
    }
}

/// Tabular export of the route, one row per point in traversal order.
pub fn to_csv(report: &ReportData) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["type", "latitude", "longitude", "timestamp", "note"])?;

    for annotated in &report.points {
        let point = &annotated.point;
        let kind = match point.kind {
            PointKind::Capture => "photo",
            PointKind::Waypoint => "waypoint",
        };
        let (lat, lon) = match point.position {
            Some(pos) => (pos.latitude_deg.to_string(), pos.longitude_deg.to_string()),
            None => (String::new(), String::new()),
        };
        let timestamp = point.timestamp.to_rfc3339();
        writer.write_record([
            kind,
            lat.as_str(),
            lon.as_str(),
            timestamp.as_str(),
            point.note.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{
        assemble, build_route, compute_statistics, LocatedSample, MissionFilter, Position,
        StyleConfig, Waypoint,
    };
    use chrono::TimeZone;

    fn report() -> ReportData {
        let samples = vec![LocatedSample {
            timestamp: Utc.timestamp_opt(100, 0).unwrap(),
            position: Position::new(37.0, -122.001),
            heading_deg: None,
            speed_m_s: None,
            battery_level: None,
            temperature_c: None,
            humidity_pct: None,
            mission_id: "m1".into(),
            rover_id: "rover_001".into(),
            note: Some("dusty".into()),
            photo_file: None,
        }];
        let waypoints = vec![Waypoint {
            id: "wp_001".into(),
            name: "Base".into(),
            category: "checkpoint".into(),
            description: "start of run".into(),
            position: Position::new(37.0, -122.0),
            mission_id: "m1".into(),
            rover_id: "rover_001".into(),
            auto_generated: false,
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
        }];
        let route = build_route(&samples, &waypoints);
        let stats = compute_statistics(&route);
        assemble(
            &MissionFilter::Mission("m1".into()),
            route,
            stats,
            &StyleConfig::default(),
        )
    }

    #[test]
    fn csv_rows_follow_route_order() {
        let csv = to_csv(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "type,latitude,longitude,timestamp,note");
        assert!(lines[1].starts_with("waypoint,37,-122,"));
        assert!(lines[1].ends_with("start of run"));
        assert!(lines[2].starts_with("photo,37,-122.001,"));
        assert!(lines[2].ends_with("dusty"));
    }

    #[test]
    fn envelope_carries_mission_id() {
        let envelope = ExportEnvelope::new(report());
        assert_eq!(envelope.mission_id, "m1");
    }
}
