use super::types::Position;

/// Mean Earth radius used for GPS distance approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two positions in meters, via the Haversine
/// formula. Total for any in-range input; identical points yield 0.
pub fn haversine_m(a: &Position, b: &Position) -> f64 {
    let lat1 = a.latitude_deg.to_radians();
    let lat2 = b.latitude_deg.to_radians();
    let dlat = (b.latitude_deg - a.latitude_deg).to_radians();
    let dlon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Floating point can overshoot 1.0 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon)
    }

    #[test]
    fn identical_points_are_zero() {
        let p = pos(37.7749, -122.4194);
        assert_eq!(haversine_m(&p, &p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = pos(37.0, -122.0);
        let b = pos(48.8566, 2.3522);
        assert_eq!(haversine_m(&a, &b), haversine_m(&b, &a));
    }

    #[test]
    fn short_segment_at_mid_latitude() {
        let a = pos(37.0, -122.0);
        let b = pos(37.0, -122.001);
        let d = haversine_m(&a, &b);
        assert!((d - 88.7).abs() < 0.5, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = pos(0.0, 0.0);
        let b = pos(0.0, 180.0);
        let d = haversine_m(&a, &b);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn triangle_inequality_on_meridian() {
        let a = pos(10.0, 20.0);
        let b = pos(15.0, 20.0);
        let c = pos(25.0, 20.0);
        let direct = haversine_m(&a, &c);
        let via = haversine_m(&a, &b) + haversine_m(&b, &c);
        assert!(direct <= via + 1e-6);
    }
}
