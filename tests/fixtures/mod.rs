//! Shared test fixtures for configuration directories and engine fakes.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use status_rotator::config::ConfigStore;
use status_rotator::models::Location;
use status_rotator::rotation::Sleeper;
use status_rotator::services::{StatusPublisher, VariableSource, Variables};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Writes one configuration document as pretty JSON.
pub fn write_document(dir: &Path, file_name: &str, value: &Value) {
    fs::write(
        dir.join(file_name),
        serde_json::to_string_pretty(value).expect("Failed to serialize document"),
    )
    .expect("Failed to write document");
}

/// Creates a configuration directory holding the three documents.
pub fn config_dir(settings: Value, presets: Value, statuses: Value) -> (TempDir, ConfigStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_document(temp_dir.path(), "settings.json", &settings);
    write_document(temp_dir.path(), "presets.json", &presets);
    write_document(temp_dir.path(), "statuses.json", &statuses);
    let store = ConfigStore::new(temp_dir.path());
    (temp_dir, store)
}

/// An active settings document playing `preset_id` every `interval` seconds.
pub fn active_settings(preset_id: i64, interval: u64) -> Value {
    json!([{
        "active": true,
        "preset_id": preset_id,
        "interval_seconds": interval,
        "location": [{"latitude": 52.52, "longitude": 13.405}]
    }])
}

/// A preset made of `static` entries referencing `ids` in order.
pub fn static_preset(id: i64, ids: &[i64]) -> Value {
    let statuses: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(sequence, status)| json!({"sequence": sequence, "type": "static", "tagFilter": "", "status": status}))
        .collect();
    json!({"id": id, "name": format!("Preset {id}"), "statuses": statuses})
}

/// A status template document entry.
pub fn status(id: &str, emoji: &str, text: &str) -> Value {
    json!({"status_id": id, "status_emoji": emoji, "status_text": text, "tags": []})
}

/// Publisher recording every status; runs `hook` with the publish count after each call.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: RefCell<Vec<(String, String)>>,
    pub hook: Option<Box<dyn Fn(usize)>>,
}

impl RecordingPublisher {
    pub fn with_hook(hook: impl Fn(usize) + 'static) -> Self {
        Self {
            published: RefCell::new(Vec::new()),
            hook: Some(Box::new(hook)),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.published
            .borrow()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl StatusPublisher for RecordingPublisher {
    fn publish(&self, emoji: &str, text: &str) -> bool {
        let count = {
            let mut published = self.published.borrow_mut();
            published.push((emoji.to_string(), text.to_string()));
            published.len()
        };
        if let Some(hook) = &self.hook {
            hook(count);
        }
        true
    }
}

/// Variable source returning fixed values and recording requested locations.
#[derive(Default)]
pub struct FixedVariables {
    pub values: Variables,
    pub locations: RefCell<Vec<Location>>,
}

impl FixedVariables {
    pub fn morning() -> Self {
        Self {
            values: Variables {
                time_emoji: "🌅".to_string(),
                time_text: "Morning".to_string(),
                timestamp_text: "08:30 AM".to_string(),
                weather_emoji: "⛅".to_string(),
                weather_text: "14.2°C Partly cloudy".to_string(),
            },
            locations: RefCell::new(Vec::new()),
        }
    }
}

impl VariableSource for FixedVariables {
    fn resolve(&self, location: Location) -> Variables {
        self.locations.borrow_mut().push(location);
        self.values.clone()
    }
}

/// Sleeper recording requested durations without waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
