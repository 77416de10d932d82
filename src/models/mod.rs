//! Data models for rotation settings, presets, and status templates.
//!
//! This module contains the structures deserialized from the three
//! configuration documents. Models are independent of I/O and of the
//! rotation loop itself.

pub mod preset;
pub mod settings;
pub mod status;

// Re-export all model types
pub use preset::{EntryKind, Preset, PresetSequenceEntry};
pub use settings::{Location, RotationSettings};
pub use status::StatusTemplate;

/// One fully loaded generation of the three configuration documents.
///
/// A `ConfigSet` is only ever replaced as a whole, so the engine never sees
/// settings from one reload combined with presets from another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSet {
    /// Contents of `settings.json`; only the first entry is consumed.
    pub settings: Vec<RotationSettings>,
    /// Contents of `presets.json`.
    pub presets: Vec<Preset>,
    /// Contents of `statuses.json`.
    pub statuses: Vec<StatusTemplate>,
}

impl ConfigSet {
    /// Returns the authoritative settings entry, if any.
    pub fn active_settings(&self) -> Option<&RotationSettings> {
        self.settings.first()
    }

    /// Finds a preset by its identifier.
    pub fn preset(&self, id: i64) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Finds a status template by its identifier.
    pub fn status(&self, id: &str) -> Option<&StatusTemplate> {
        self.statuses.iter().find(|status| status.id == id)
    }

    /// Iterates over every sequence entry whose `status` failed shape validation.
    pub fn malformed_entries(&self) -> impl Iterator<Item = (&Preset, &PresetSequenceEntry)> {
        self.presets.iter().flat_map(|preset| {
            preset
                .statuses
                .iter()
                .filter(|entry| matches!(entry.kind, EntryKind::Malformed { .. }))
                .map(move |entry| (preset, entry))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str) -> StatusTemplate {
        StatusTemplate {
            id: id.to_string(),
            emoji: String::new(),
            text: format!("text {id}"),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_active_settings_uses_first_entry() {
        let config = ConfigSet {
            settings: vec![
                RotationSettings {
                    preset_id: 7,
                    ..RotationSettings::default()
                },
                RotationSettings {
                    preset_id: 9,
                    ..RotationSettings::default()
                },
            ],
            ..ConfigSet::default()
        };

        assert_eq!(config.active_settings().map(|s| s.preset_id), Some(7));
        assert!(ConfigSet::default().active_settings().is_none());
    }

    #[test]
    fn test_lookup_by_id() {
        let config = ConfigSet {
            statuses: vec![status("1"), status("2")],
            presets: vec![Preset {
                id: 4,
                name: "Work".to_string(),
                statuses: Vec::new(),
            }],
            ..ConfigSet::default()
        };

        assert_eq!(config.status("2").map(|s| s.text.as_str()), Some("text 2"));
        assert!(config.status("3").is_none());
        assert_eq!(config.preset(4).map(|p| p.name.as_str()), Some("Work"));
        assert!(config.preset(5).is_none());
    }

    #[test]
    fn test_malformed_entries_are_listed() {
        let presets: Vec<Preset> = serde_json::from_str(
            r#"[{"id": 1, "name": "p", "statuses": [
                {"sequence": 0, "type": "static", "status": [1, 2]},
                {"sequence": 1, "type": "static", "status": 1}
            ]}]"#,
        )
        .unwrap();
        let config = ConfigSet {
            presets,
            ..ConfigSet::default()
        };

        let malformed: Vec<_> = config.malformed_entries().collect();
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].1.sequence, 0);
    }
}
