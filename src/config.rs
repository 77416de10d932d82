//! Configuration store for the rotation documents.
//!
//! This module loads the three JSON documents (`settings.json`,
//! `presets.json`, `statuses.json`) from a configuration directory,
//! detects byte-level changes, and writes validated replacements
//! atomically for the web API.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::models::{ConfigSet, Preset, RotationSettings, StatusTemplate};

/// The three documents making up a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    /// Rotation settings (`settings.json`)
    Settings,
    /// Preset scripts (`presets.json`)
    Presets,
    /// Status templates (`statuses.json`)
    Statuses,
}

impl ConfigKind {
    /// All document kinds, in load order.
    pub const ALL: [Self; 3] = [Self::Settings, Self::Presets, Self::Statuses];

    /// File name of the document inside the configuration directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Settings => "settings.json",
            Self::Presets => "presets.json",
            Self::Statuses => "statuses.json",
        }
    }

    /// Short name used in API paths (`settings`, `presets`, `statuses`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Presets => "presets",
            Self::Statuses => "statuses",
        }
    }

    /// Parses the short name used in API paths.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Checks that `data` deserializes as this document's array schema.
    pub fn validate(self, data: &[u8]) -> Result<()> {
        match self {
            Self::Settings => parse_document::<RotationSettings>(self, data).map(drop),
            Self::Presets => parse_document::<Preset>(self, data).map(drop),
            Self::Statuses => parse_document::<StatusTemplate>(self, data).map(drop),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_document<T: DeserializeOwned>(kind: ConfigKind, data: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(data).with_context(|| format!("Failed to parse {}", kind.file_name()))
}

/// The last observed raw bytes of a watched file.
///
/// Owned by whoever polls for changes; a fresh snapshot has seen nothing,
/// so the first successful read always counts as a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSnapshot {
    bytes: Option<Vec<u8>>,
}

impl FileSnapshot {
    /// Creates a snapshot that has not observed the file yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes seen on the last detected change.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

/// Re-reads `path` and compares it byte-for-byte against `last`.
///
/// Returns `true` and updates the snapshot when the content differs
/// (including the first read). A failed read returns `false` and leaves the
/// snapshot untouched.
pub fn file_changed(path: &Path, last: &mut FileSnapshot) -> bool {
    let Ok(data) = fs::read(path) else {
        return false;
    };

    if last.bytes.as_deref() == Some(data.as_slice()) {
        return false;
    }

    last.bytes = Some(data);
    true
}

/// Reads and writes the configuration documents of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configuration directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a document.
    pub fn path(&self, kind: ConfigKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Full path of the settings document, the one watched for changes.
    pub fn settings_path(&self) -> PathBuf {
        self.path(ConfigKind::Settings)
    }

    /// Loads all three documents.
    ///
    /// Fails as a whole if any document is unreadable or does not parse;
    /// nothing is returned in that case, so callers keep their previous
    /// configuration.
    pub fn load(&self) -> Result<ConfigSet> {
        let settings = self.read_document(ConfigKind::Settings)?;
        let presets = self.read_document(ConfigKind::Presets)?;
        let statuses = self.read_document(ConfigKind::Statuses)?;

        let config = ConfigSet {
            settings,
            presets,
            statuses,
        };

        for (preset, entry) in config.malformed_entries() {
            warn!(
                preset = preset.id,
                sequence = entry.sequence,
                "Sequence entry has a malformed status reference: {:?}",
                entry.kind
            );
        }

        Ok(config)
    }

    /// Checks whether the settings document changed since `snapshot`.
    pub fn settings_changed(&self, snapshot: &mut FileSnapshot) -> bool {
        file_changed(&self.settings_path(), snapshot)
    }

    /// Reads the raw bytes of a document.
    pub fn read_raw(&self, kind: ConfigKind) -> Result<Vec<u8>> {
        let path = self.path(kind);
        fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Writes a document using atomic write.
    ///
    /// Uses temp file + rename so the rotation loop never reads a
    /// half-written document. Callers check `data` with
    /// [`ConfigKind::validate`] first.
    pub fn save_raw(&self, kind: ConfigKind, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).context(format!(
            "Failed to create config directory: {}",
            self.dir.display()
        ))?;

        let path = self.path(kind);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, data).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    fn read_document<T: DeserializeOwned>(&self, kind: ConfigKind) -> Result<Vec<T>> {
        let data = self.read_raw(kind)?;
        parse_document(kind, &data)
    }
}
