use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Known waypoint categories. Anything else falls back to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WaypointBucket {
    General,
    Auto,
    Checkpoint,
    Landmark,
    Hazard,
}

impl WaypointBucket {
    pub fn from_category(category: &str) -> Self {
        match category {
            "auto" => WaypointBucket::Auto,
            "checkpoint" => WaypointBucket::Checkpoint,
            "landmark" => WaypointBucket::Landmark,
            "hazard" => WaypointBucket::Hazard,
            _ => WaypointBucket::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaypointBucket::General => "general",
            WaypointBucket::Auto => "auto",
            WaypointBucket::Checkpoint => "checkpoint",
            WaypointBucket::Landmark => "landmark",
            WaypointBucket::Hazard => "hazard",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            WaypointBucket::General => "blue",
            WaypointBucket::Auto => "green",
            WaypointBucket::Checkpoint => "red",
            WaypointBucket::Landmark => "orange",
            WaypointBucket::Hazard => "darkred",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpeedBucket {
    Low,
    Medium,
    High,
}

impl SpeedBucket {
    pub fn label(self) -> &'static str {
        match self {
            SpeedBucket::Low => "low",
            SpeedBucket::Medium => "medium",
            SpeedBucket::High => "high",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SpeedBucket::Low => "green",
            SpeedBucket::Medium => "orange",
            SpeedBucket::High => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BatteryBucket {
    Critical,
    Low,
    Nominal,
    Full,
}

impl BatteryBucket {
    pub fn label(self) -> &'static str {
        match self {
            BatteryBucket::Critical => "critical",
            BatteryBucket::Low => "low",
            BatteryBucket::Nominal => "nominal",
            BatteryBucket::Full => "full",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BatteryBucket::Critical => "red",
            BatteryBucket::Low => "orange",
            BatteryBucket::Nominal => "green",
            BatteryBucket::Full => "darkgreen",
        }
    }
}

/// Tier boundaries for speed buckets, in m/s. Above `high_min` is high,
/// above `low_max` is medium, everything else low.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpeedThresholds {
    #[serde(default = "SpeedThresholds::default_low_max")]
    pub low_max: f64,
    #[serde(default = "SpeedThresholds::default_high_min")]
    pub high_min: f64,
}

impl SpeedThresholds {
    fn default_low_max() -> f64 {
        2.0
    }

    fn default_high_min() -> f64 {
        5.0
    }

    pub fn bucket(&self, speed_m_s: f64) -> SpeedBucket {
        if speed_m_s > self.high_min {
            SpeedBucket::High
        } else if speed_m_s > self.low_max {
            SpeedBucket::Medium
        } else {
            SpeedBucket::Low
        }
    }
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            low_max: Self::default_low_max(),
            high_min: Self::default_high_min(),
        }
    }
}

/// Tier boundaries for battery buckets, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BatteryThresholds {
    #[serde(default = "BatteryThresholds::default_critical_max")]
    pub critical_max: f64,
    #[serde(default = "BatteryThresholds::default_low_max")]
    pub low_max: f64,
    #[serde(default = "BatteryThresholds::default_nominal_max")]
    pub nominal_max: f64,
}

impl BatteryThresholds {
    fn default_critical_max() -> f64 {
        20.0
    }

    fn default_low_max() -> f64 {
        50.0
    }

    fn default_nominal_max() -> f64 {
        90.0
    }

    pub fn bucket(&self, level_pct: f64) -> BatteryBucket {
        if level_pct <= self.critical_max {
            BatteryBucket::Critical
        } else if level_pct <= self.low_max {
            BatteryBucket::Low
        } else if level_pct <= self.nominal_max {
            BatteryBucket::Nominal
        } else {
            BatteryBucket::Full
        }
    }
}

impl Default for BatteryThresholds {
    fn default() -> Self {
        Self {
            critical_max: Self::default_critical_max(),
            low_max: Self::default_low_max(),
            nominal_max: Self::default_nominal_max(),
        }
    }
}

/// Domain-tunable bucket boundaries, loaded from the service config.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub speed: SpeedThresholds,
    #[serde(default)]
    pub battery: BatteryThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_their_bucket() {
        assert_eq!(
            WaypointBucket::from_category("checkpoint"),
            WaypointBucket::Checkpoint
        );
        assert_eq!(WaypointBucket::from_category("auto"), WaypointBucket::Auto);
        assert_eq!(
            WaypointBucket::from_category("hazard"),
            WaypointBucket::Hazard
        );
    }

    #[test]
    fn unknown_category_falls_back_to_general() {
        assert_eq!(
            WaypointBucket::from_category("volcano"),
            WaypointBucket::General
        );
        assert_eq!(WaypointBucket::from_category(""), WaypointBucket::General);
    }

    #[test]
    fn speed_tiers_with_default_thresholds() {
        let cfg = SpeedThresholds::default();
        assert_eq!(cfg.bucket(0.0), SpeedBucket::Low);
        assert_eq!(cfg.bucket(2.0), SpeedBucket::Low);
        assert_eq!(cfg.bucket(2.1), SpeedBucket::Medium);
        assert_eq!(cfg.bucket(5.0), SpeedBucket::Medium);
        assert_eq!(cfg.bucket(5.1), SpeedBucket::High);
    }

    #[test]
    fn battery_tiers_with_default_thresholds() {
        let cfg = BatteryThresholds::default();
        assert_eq!(cfg.bucket(10.0), BatteryBucket::Critical);
        assert_eq!(cfg.bucket(20.0), BatteryBucket::Critical);
        assert_eq!(cfg.bucket(35.0), BatteryBucket::Low);
        assert_eq!(cfg.bucket(75.0), BatteryBucket::Nominal);
        assert_eq!(cfg.bucket(95.0), BatteryBucket::Full);
    }

    #[test]
    fn thresholds_are_configurable() {
        let cfg: StyleConfig = serde_yaml::from_str("speed:\n  low_max: 1.0\n").unwrap();
        assert_eq!(cfg.speed.low_max, 1.0);
        // Unspecified boundaries keep their defaults.
        assert_eq!(cfg.speed.high_min, 5.0);
        assert_eq!(cfg.battery, BatteryThresholds::default());
        assert_eq!(cfg.speed.bucket(1.5), SpeedBucket::Medium);
    }
}
