//! Rotation settings read from `settings.json`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    /// Latitude in degrees, north positive
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees, east positive
    #[serde(default)]
    pub longitude: f64,
}

impl Location {
    /// Creates a location from a latitude/longitude pair.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The coordinate used when no location is configured.
    pub const fn fallback() -> Self {
        Self::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE)
    }
}

/// The settings document driving the rotation loop.
///
/// Missing fields take their zero values, so `{}` is a valid (inactive)
/// settings entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RotationSettings {
    /// Whether the rotation is running
    pub active: bool,
    /// Identifier of the preset to play
    pub preset_id: i64,
    /// Seconds to wait between published statuses
    pub interval_seconds: u64,
    /// Candidate locations for live variables; the first one is used
    #[serde(rename = "location")]
    pub locations: Vec<Location>,
}

impl RotationSettings {
    /// The wait between two published statuses.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// The location used for variable resolution.
    pub fn primary_location(&self) -> Location {
        self.locations.first().copied().unwrap_or_else(Location::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_deserialize_full() {
        let settings: Vec<RotationSettings> = serde_json::from_str(
            r#"[{"active": true, "preset_id": 3, "interval_seconds": 30,
                 "location": [{"latitude": 48.85, "longitude": 2.35}]}]"#,
        )
        .unwrap();

        let first = &settings[0];
        assert!(first.active);
        assert_eq!(first.preset_id, 3);
        assert_eq!(first.interval(), Duration::from_secs(30));
        assert_eq!(first.primary_location(), Location::new(48.85, 2.35));
    }

    #[test]
    fn test_settings_missing_fields_default() {
        let settings: RotationSettings = serde_json::from_str("{}").unwrap();
        assert!(!settings.active);
        assert_eq!(settings.preset_id, 0);
        assert_eq!(settings.interval_seconds, 0);
        assert!(settings.locations.is_empty());
    }

    #[test]
    fn test_primary_location_falls_back() {
        let settings = RotationSettings::default();
        assert_eq!(settings.primary_location(), Location::fallback());
    }

    #[test]
    fn test_negative_interval_rejected() {
        let result: Result<RotationSettings, _> =
            serde_json::from_str(r#"{"interval_seconds": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let settings: RotationSettings =
            serde_json::from_str(r#"{"active": true, "status_sequence_number": 4}"#).unwrap();
        assert!(settings.active);
    }
}
