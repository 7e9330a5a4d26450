use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::route::{LocatedSample, MissionFilter, Position, Waypoint};

const META_FILE: &str = "metadata.json";
const WAYPOINT_FILE: &str = "waypoints.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A waypoint as submitted, before the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewWaypoint {
    pub name: String,
    pub category: String,
    pub description: String,
    pub position: Position,
    pub mission_id: String,
    pub rover_id: String,
    pub auto_generated: bool,
    pub timestamp: DateTime<Utc>,
}

/// JSON-file-backed store for telemetry samples and waypoints. Records are
/// kept in insertion order; queries return filtered views in that order.
pub struct Store {
    base: PathBuf,
}

impl Store {
    pub fn new(base: PathBuf) -> Self {
        Store { base }
    }

    fn read_all<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.base.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let path = self.base.join(file);
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, content)?;
        debug!("wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// All samples matching the filter, in insertion order. A missing
    /// backing file is an empty store, not an error.
    pub fn samples(&self, filter: &MissionFilter) -> Result<Vec<LocatedSample>, StoreError> {
        let mut samples: Vec<LocatedSample> = self.read_all(META_FILE)?;
        samples.retain(|s| filter.matches(&s.mission_id));
        Ok(samples)
    }

    pub fn waypoints(&self, filter: &MissionFilter) -> Result<Vec<Waypoint>, StoreError> {
        let mut waypoints: Vec<Waypoint> = self.read_all(WAYPOINT_FILE)?;
        waypoints.retain(|w| filter.matches(&w.mission_id));
        Ok(waypoints)
    }

    pub fn append_sample(&self, sample: LocatedSample) -> Result<(), StoreError> {
        let mut all: Vec<LocatedSample> = self.read_all(META_FILE)?;
        all.push(sample);
        self.write_all(META_FILE, &all)
    }

    /// Append a waypoint, assigning the next monotonic id.
    pub fn append_waypoint(&self, draft: NewWaypoint) -> Result<Waypoint, StoreError> {
        let mut all: Vec<Waypoint> = self.read_all(WAYPOINT_FILE)?;
        let waypoint = Waypoint {
            id: format!("wp_{:03}", all.len() + 1),
            name: draft.name,
            category: draft.category,
            description: draft.description,
            position: draft.position,
            mission_id: draft.mission_id,
            rover_id: draft.rover_id,
            auto_generated: draft.auto_generated,
            timestamp: draft.timestamp,
        };
        all.push(waypoint.clone());
        self.write_all(WAYPOINT_FILE, &all)?;
        Ok(waypoint)
    }

    /// Name for the next auto-generated waypoint, numbered per mission.
    pub fn next_auto_name(&self, mission_id: &str) -> Result<String, StoreError> {
        let existing = self.waypoints(&MissionFilter::Mission(mission_id.to_string()))?;
        Ok(format!("Auto Waypoint {}", existing.len() + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Position;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample(mission: &str, secs: i64) -> LocatedSample {
        LocatedSample {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            position: Position::new(37.0, -122.0),
            heading_deg: None,
            speed_m_s: Some(1.5),
            battery_level: Some(85.0),
            temperature_c: None,
            humidity_pct: None,
            mission_id: mission.into(),
            rover_id: "rover_001".into(),
            note: None,
            photo_file: None,
        }
    }

    fn draft(mission: &str, name: &str) -> NewWaypoint {
        NewWaypoint {
            name: name.into(),
            category: "general".into(),
            description: String::new(),
            position: Position::new(37.0, -122.0),
            mission_id: mission.into(),
            rover_id: "rover_001".into(),
            auto_generated: false,
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        assert!(store.samples(&MissionFilter::All).unwrap().is_empty());
        assert!(store.waypoints(&MissionFilter::All).unwrap().is_empty());
    }

    #[test]
    fn append_and_query_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.append_sample(sample("m1", 30)).unwrap();
        store.append_sample(sample("m2", 10)).unwrap();
        store.append_sample(sample("m1", 20)).unwrap();

        let all = store.samples(&MissionFilter::All).unwrap();
        assert_eq!(all.len(), 3);
        // Storage order, not timestamp order.
        assert_eq!(all[0].timestamp.timestamp(), 30);

        let m1 = store.samples(&MissionFilter::Mission("m1".into())).unwrap();
        assert_eq!(m1.len(), 2);
        assert_eq!(m1[0].timestamp.timestamp(), 30);
        assert_eq!(m1[1].timestamp.timestamp(), 20);
    }

    #[test]
    fn waypoint_ids_are_monotonic() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        let first = store.append_waypoint(draft("m1", "Base")).unwrap();
        let second = store.append_waypoint(draft("m2", "Ridge")).unwrap();
        assert_eq!(first.id, "wp_001");
        assert_eq!(second.id, "wp_002");
    }

    #[test]
    fn auto_names_count_per_mission() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        assert_eq!(store.next_auto_name("m1").unwrap(), "Auto Waypoint 1");
        store.append_waypoint(draft("m1", "Auto Waypoint 1")).unwrap();
        store.append_waypoint(draft("m2", "Other")).unwrap();
        assert_eq!(store.next_auto_name("m1").unwrap(), "Auto Waypoint 2");
    }
}
