mod builder;
mod geo;
mod report;
mod stats;
mod style;
mod types;

pub use builder::build_route;
pub use geo::haversine_m;
pub use report::{assemble, AnnotatedPoint, AnnotatedSegment, ReportData, StyleBucket};
pub use stats::compute_statistics;
pub use style::{
    BatteryBucket, BatteryThresholds, SpeedBucket, SpeedThresholds, StyleConfig, WaypointBucket,
};
pub use types::{
    normalize_heading, LocatedSample, MissionFilter, PointKind, Position, RangeSummary, RoutePoint,
    RouteStatistics, Waypoint,
};
