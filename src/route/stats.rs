use chrono::{DateTime, Utc};

use super::geo::haversine_m;
use super::types::{PointKind, Position, RangeSummary, RoutePoint, RouteStatistics};

/// Compute aggregate statistics over a built route. Total for any input:
/// empty and single-point routes produce the zero/null statistics, and
/// non-finite readings or coordinates are excluded rather than propagated.
pub fn compute_statistics(route: &[RoutePoint]) -> RouteStatistics {
    let sample_count = route
        .iter()
        .filter(|p| p.kind == PointKind::Capture)
        .count();
    let waypoint_count = route.len() - sample_count;

    if route.is_empty() {
        return RouteStatistics::empty(0, 0);
    }

    let total_duration_s = if route.len() >= 2 {
        let first = route[0].timestamp;
        let last = route[route.len() - 1].timestamp;
        duration_s(first, last).max(0.0)
    } else {
        0.0
    };

    let mut total_distance_m = 0.0;
    let mut speeds: Vec<f64> = Vec::new();
    // Last point that carried finite coordinates; points without one are
    // bridged over, not dropped from the path.
    let mut prev_located: Option<(DateTime<Utc>, Position)> = None;

    for point in route {
        let located = finite_position(point);

        let mut segment: Option<(f64, f64)> = None;
        if let (Some((prev_ts, prev_pos)), Some(pos)) = (&prev_located, &located) {
            let distance = haversine_m(prev_pos, pos);
            if distance.is_finite() {
                total_distance_m += distance;
                segment = Some((distance, duration_s(*prev_ts, point.timestamp)));
            }
        }

        // Waypoints never contribute a speed sample, reported or derived.
        if point.kind == PointKind::Capture {
            match point.speed_m_s {
                Some(reported) if reported.is_finite() => speeds.push(reported),
                _ => {
                    if let Some((distance, dt)) = segment {
                        // Zero-duration segments give no speed sample.
                        if dt > 0.0 {
                            let derived = distance / dt;
                            if derived.is_finite() {
                                speeds.push(derived);
                            }
                        }
                    }
                }
            }
        }

        if let Some(pos) = located {
            prev_located = Some((point.timestamp, pos));
        }
    }

    let (average_speed_m_s, min_speed_m_s, max_speed_m_s) = speed_summary(&speeds);
    let (battery_start_pct, battery_end_pct, battery_consumed_pct) = battery_summary(route);

    RouteStatistics {
        total_distance_m,
        total_duration_s,
        average_speed_m_s,
        max_speed_m_s,
        min_speed_m_s,
        battery_start_pct,
        battery_end_pct,
        battery_consumed_pct,
        temperature_c: range_summary(route, |p| p.temperature_c),
        humidity_pct: range_summary(route, |p| p.humidity_pct),
        sample_count,
        waypoint_count,
    }
}

fn duration_s(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

fn finite_position(point: &RoutePoint) -> Option<Position> {
    point
        .position
        .filter(|p| p.latitude_deg.is_finite() && p.longitude_deg.is_finite())
}

fn speed_summary(speeds: &[f64]) -> (Option<f64>, Option<f64>, Option<f64>) {
    if speeds.is_empty() {
        return (None, None, None);
    }
    let sum: f64 = speeds.iter().sum();
    let min = speeds.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = speeds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (Some(sum / speeds.len() as f64), Some(min), Some(max))
}

fn battery_summary(route: &[RoutePoint]) -> (Option<f64>, Option<f64>, Option<f64>) {
    let mut readings = route
        .iter()
        .filter(|p| p.kind == PointKind::Capture)
        .filter_map(|p| p.battery_level.filter(|v| v.is_finite()));

    let start = readings.next();
    let end = readings.last().or(start);
    // Negative consumption means the rover charged along the way.
    let consumed = match (start, end) {
        (Some(s), Some(e)) => Some(s - e),
        _ => None,
    };
    (start, end, consumed)
}

fn range_summary<F>(route: &[RoutePoint], reading: F) -> Option<RangeSummary>
where
    F: Fn(&RoutePoint) -> Option<f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for point in route.iter().filter(|p| p.kind == PointKind::Capture) {
        if let Some(value) = reading(point).filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some(RangeSummary {
        min,
        max,
        average: sum / count as f64,
    })
}
