use serde::Serialize;
use utoipa::ToSchema;

use super::geo::haversine_m;
use super::style::{StyleConfig, WaypointBucket};
use super::types::{MissionFilter, PointKind, RoutePoint, RouteStatistics};

/// A discrete presentation bucket plus the color key renderers map it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StyleBucket {
    pub bucket: String,
    pub color: String,
}

impl StyleBucket {
    fn new(bucket: &str, color: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            color: color.to_string(),
        }
    }

    /// Neutral bucket for points or segments with nothing to classify on.
    fn none() -> Self {
        Self::new("none", "gray")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnotatedPoint {
    #[serde(flatten)]
    pub point: RoutePoint,
    pub style: StyleBucket,
}

/// Annotation for the segment between consecutive route points, indexed
/// into the point sequence.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnotatedSegment {
    pub from_index: usize,
    pub to_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,
    pub style: StyleBucket,
}

/// The complete hand-off structure for HTML/map renderers and exporters.
/// Field names and nesting are the compatibility surface.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportData {
    pub mission_id: String,
    pub points: Vec<AnnotatedPoint>,
    pub segments: Vec<AnnotatedSegment>,
    pub statistics: RouteStatistics,
}

/// Compose route, statistics and style annotations into one structure.
/// Pure and deterministic: the same inputs always assemble the same report.
pub fn assemble(
    filter: &MissionFilter,
    route: Vec<RoutePoint>,
    statistics: RouteStatistics,
    style: &StyleConfig,
) -> ReportData {
    let segments = annotate_segments(&route, style);
    let points = route
        .into_iter()
        .map(|point| {
            let style = point_style(&point, style);
            AnnotatedPoint { point, style }
        })
        .collect();

    ReportData {
        mission_id: filter.label().to_string(),
        points,
        segments,
        statistics,
    }
}

fn point_style(point: &RoutePoint, style: &StyleConfig) -> StyleBucket {
    match point.kind {
        PointKind::Waypoint => {
            let bucket = WaypointBucket::from_category(point.category.as_deref().unwrap_or(""));
            StyleBucket::new(bucket.label(), bucket.color())
        }
        PointKind::Capture => match point.battery_level {
            Some(level) if level.is_finite() => {
                let bucket = style.battery.bucket(level);
                StyleBucket::new(bucket.label(), bucket.color())
            }
            _ => StyleBucket::none(),
        },
    }
}

fn annotate_segments(route: &[RoutePoint], style: &StyleConfig) -> Vec<AnnotatedSegment> {
    route
        .windows(2)
        .enumerate()
        .map(|(i, pair)| annotate_segment(i, &pair[0], &pair[1], style))
        .collect()
}

fn annotate_segment(
    from_index: usize,
    from: &RoutePoint,
    to: &RoutePoint,
    style: &StyleConfig,
) -> AnnotatedSegment {
    let distance_m = match (&from.position, &to.position) {
        (Some(a), Some(b)) => Some(haversine_m(a, b)).filter(|d| d.is_finite()),
        _ => None,
    };

    // Reported speed of the segment's starting point wins; otherwise derive
    // from the segment itself.
    let speed_m_s = from
        .speed_m_s
        .filter(|v| v.is_finite())
        .or_else(|| {
            let dt = (to.timestamp - from.timestamp).num_milliseconds() as f64 / 1000.0;
            match distance_m {
                Some(d) if dt > 0.0 => Some(d / dt).filter(|v| v.is_finite()),
                _ => None,
            }
        });

    let segment_style = match speed_m_s {
        Some(v) => {
            let bucket = style.speed.bucket(v);
            StyleBucket::new(bucket.label(), bucket.color())
        }
        None => StyleBucket::none(),
    };

    AnnotatedSegment {
        from_index,
        to_index: from_index + 1,
        distance_m,
        speed_m_s,
        style: segment_style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::stats::compute_statistics;
    use crate::route::types::Position;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn point(secs: i64, kind: PointKind) -> RoutePoint {
        RoutePoint {
            timestamp: ts(secs),
            position: Some(Position::new(37.0, -122.0 - secs as f64 * 1e-5)),
            kind,
            source_id: None,
            name: None,
            category: None,
            note: None,
            speed_m_s: None,
            battery_level: None,
            temperature_c: None,
            humidity_pct: None,
        }
    }

    fn assemble_sample_route() -> ReportData {
        let mut route = vec![
            point(0, PointKind::Capture),
            point(100, PointKind::Capture),
            point(200, PointKind::Waypoint),
        ];
        route[0].speed_m_s = Some(6.0);
        route[0].battery_level = Some(15.0);
        route[2].category = Some("volcano".into());
        let stats = compute_statistics(&route);
        assemble(
            &MissionFilter::Mission("m1".into()),
            route,
            stats,
            &StyleConfig::default(),
        )
    }

    #[test]
    fn one_segment_per_consecutive_pair() {
        let report = assemble_sample_route();
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.segments[0].from_index, 0);
        assert_eq!(report.segments[0].to_index, 1);
        assert_eq!(report.segments[1].to_index, 2);
    }

    #[test]
    fn segment_style_prefers_reported_speed() {
        let report = assemble_sample_route();
        // 6.0 m/s reported on the first point is over the default high_min.
        assert_eq!(report.segments[0].style.bucket, "high");
        assert_eq!(report.segments[0].style.color, "red");
        // Second segment has no reported speed and derives a slow one.
        assert_eq!(report.segments[1].style.bucket, "low");
    }

    #[test]
    fn capture_points_are_styled_by_battery() {
        let report = assemble_sample_route();
        assert_eq!(report.points[0].style.bucket, "critical");
        assert_eq!(report.points[1].style.bucket, "none");
    }

    #[test]
    fn unknown_waypoint_category_styles_as_general() {
        let report = assemble_sample_route();
        assert_eq!(report.points[2].style.bucket, "general");
        assert_eq!(report.points[2].style.color, "blue");
    }

    #[test]
    fn assemble_is_idempotent() {
        let first = assemble_sample_route();
        let second = assemble_sample_route();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_route_assembles_cleanly() {
        let stats = compute_statistics(&[]);
        let report = assemble(&MissionFilter::All, Vec::new(), stats, &StyleConfig::default());
        assert_eq!(report.mission_id, "all_missions");
        assert!(report.points.is_empty());
        assert!(report.segments.is_empty());
        assert_eq!(report.statistics.total_distance_m, 0.0);
    }
}
