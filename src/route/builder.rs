use super::types::{LocatedSample, PointKind, RoutePoint, Waypoint};

/// Merge capture samples and waypoints into one time-ordered path.
///
/// The sort is stable and keys on (timestamp, kind), so points sharing a
/// timestamp keep captures ahead of waypoints and otherwise retain their
/// insertion order. Zero or one total point is a valid degenerate route.
pub fn build_route(samples: &[LocatedSample], waypoints: &[Waypoint]) -> Vec<RoutePoint> {
    let mut points: Vec<RoutePoint> = Vec::with_capacity(samples.len() + waypoints.len());

    for sample in samples {
        points.push(capture_point(sample));
    }
    for waypoint in waypoints {
        points.push(waypoint_point(waypoint));
    }

    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.kind.cmp(&b.kind)));
    points
}

fn capture_point(sample: &LocatedSample) -> RoutePoint {
    RoutePoint {
        timestamp: sample.timestamp,
        position: Some(sample.position),
        kind: PointKind::Capture,
        source_id: sample.photo_file.clone(),
        name: None,
        category: None,
        note: sample.note.clone(),
        speed_m_s: sample.speed_m_s,
        battery_level: sample.battery_level,
        temperature_c: sample.temperature_c,
        humidity_pct: sample.humidity_pct,
    }
}

fn waypoint_point(waypoint: &Waypoint) -> RoutePoint {
    RoutePoint {
        timestamp: waypoint.timestamp,
        position: Some(waypoint.position),
        kind: PointKind::Waypoint,
        source_id: Some(waypoint.id.clone()),
        name: Some(waypoint.name.clone()),
        category: Some(waypoint.category.clone()),
        note: if waypoint.description.is_empty() {
            None
        } else {
            Some(waypoint.description.clone())
        },
        speed_m_s: None,
        battery_level: None,
        temperature_c: None,
        humidity_pct: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::types::Position;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample(secs: i64) -> LocatedSample {
        LocatedSample {
            timestamp: ts(secs),
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

    fn waypoint(id: &str, secs: i64) -> Waypoint {
        Waypoint {
            id: id.into(),
            name: format!("wp {id}"),
            category: "general".into(),
            description: String::new(),
            position: Position::new(37.0, -122.0),
            mission_id: "m1".into(),
            rover_id: "rover_001".into(),
            auto_generated: false,
            timestamp: ts(secs),
        }
    }

    #[test]
    fn empty_inputs_yield_empty_route() {
        assert!(build_route(&[], &[]).is_empty());
    }

    #[test]
    fn sorted_by_timestamp() {
        let samples = vec![sample(30), sample(10)];
        let waypoints = vec![waypoint("wp_001", 20)];
        let route = build_route(&samples, &waypoints);
        let times: Vec<i64> = route.iter().map(|p| p.timestamp.timestamp()).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    #[test]
    fn captures_precede_waypoints_on_tie() {
        let samples = vec![sample(10)];
        let waypoints = vec![waypoint("wp_001", 10)];
        // Waypoint handed in first must still land second.
        let route = build_route(&samples, &waypoints);
        assert_eq!(route[0].kind, PointKind::Capture);
        assert_eq!(route[1].kind, PointKind::Waypoint);
    }

    #[test]
    fn equal_waypoints_keep_insertion_order() {
        let waypoints = vec![waypoint("wp_001", 10), waypoint("wp_002", 10)];
        let route = build_route(&[], &waypoints);
        assert_eq!(route[0].source_id.as_deref(), Some("wp_001"));
        assert_eq!(route[1].source_id.as_deref(), Some("wp_002"));
    }

    #[test]
    fn waypoint_points_carry_no_telemetry() {
        let route = build_route(&[], &[waypoint("wp_001", 10)]);
        assert!(route[0].speed_m_s.is_none());
        assert!(route[0].battery_level.is_none());
        assert!(route[0].temperature_c.is_none());
        assert!(route[0].humidity_pct.is_none());
    }
}
