use askama::Template;
use askama_web::WebTemplate;

/// Pre-formatted rows so the template stays free of Option handling.
pub struct WaypointRow {
    pub name: String,
    pub bucket: String,
    pub color: String,
    pub coordinates: String,
    pub time: String,
    pub description: String,
}

pub struct SegmentRow {
    pub index: usize,
    pub distance: String,
    pub speed: String,
    pub bucket: String,
    pub color: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub mission_id: String,
    pub total_distance_km: String,
    pub average_speed: String,
    pub max_speed: String,
    pub duration_s: String,
    pub battery_start: String,
    pub battery_end: String,
    pub battery_consumed: String,
    pub avg_temperature: String,
    pub avg_humidity: String,
    pub sample_count: usize,
    pub waypoint_count: usize,
    pub waypoints: Vec<WaypointRow>,
    pub segments: Vec<SegmentRow>,
}
