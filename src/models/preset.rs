//! Presets read from `presets.json`.
//!
//! A preset is an ordered script of sequence entries. Each entry declares a
//! resolution mode (`static`, `random`, `none`) and an untyped `status`
//! reference whose shape depends on that mode. The shape is checked once,
//! when the document is deserialized, and the result is kept as an
//! [`EntryKind`] so the rotation loop never re-interprets raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named rotation program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preset {
    /// Unique identifier referenced by `preset_id` in the settings
    #[serde(default)]
    pub id: i64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Sequence entries, played in list order
    #[serde(default)]
    pub statuses: Vec<PresetSequenceEntry>,
}

/// How a sequence entry resolves to status templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Always the referenced template.
    Static(String),
    /// A uniform draw among the referenced templates.
    Random(Vec<String>),
    /// An empty status.
    None,
    /// A mode the loop does not know; behaves like `None`.
    Unknown(String),
    /// The `status` reference does not fit the declared mode; behaves like `None`.
    Malformed {
        /// The declared mode
        declared: String,
        /// What was wrong with the reference
        reason: String,
    },
}

/// One step of a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSequenceEntry", into = "RawSequenceEntry")]
pub struct PresetSequenceEntry {
    /// Position label as written in the document
    pub sequence: i64,
    /// The declared mode, verbatim
    pub declared_type: String,
    /// Tag filter (carried through, not interpreted)
    pub tag_filter: String,
    /// The raw `status` value, kept for re-serialization
    pub status: Value,
    /// The validated interpretation of `declared_type` + `status`
    pub kind: EntryKind,
}

impl PresetSequenceEntry {
    /// Builds an entry from its document fields, validating the reference shape.
    pub fn new(sequence: i64, declared_type: impl Into<String>, status: Value) -> Self {
        let declared_type = declared_type.into();
        let kind = EntryKind::classify(&declared_type, &status);
        Self {
            sequence,
            declared_type,
            tag_filter: String::new(),
            status,
            kind,
        }
    }
}

impl EntryKind {
    fn classify(declared: &str, status: &Value) -> Self {
        match declared {
            "static" => match status_ref(status) {
                Some(id) => Self::Static(id),
                None => Self::malformed(declared, "expected a single status id"),
            },
            "random" => match status {
                Value::Array(items) => {
                    let ids: Option<Vec<String>> = items.iter().map(status_ref).collect();
                    match ids {
                        Some(ids) => Self::Random(ids),
                        None => Self::malformed(declared, "expected an array of status ids"),
                    }
                }
                _ => Self::malformed(declared, "expected an array of status ids"),
            },
            "none" => Self::None,
            other => Self::Unknown(other.to_string()),
        }
    }

    fn malformed(declared: &str, reason: &str) -> Self {
        Self::Malformed {
            declared: declared.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Normalizes a scalar reference into the string form used by `status_id`.
///
/// Integer-valued numbers (including `3.0`) become their decimal digits.
fn status_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Some(uint.to_string())
            } else {
                let float = number.as_f64()?;
                if float.fract() == 0.0 && float.abs() < 9.0e15 {
                    Some((float as i64).to_string())
                } else {
                    Some(float.to_string())
                }
            }
        }
        _ => None,
    }
}

/// Wire form of a sequence entry.
#[derive(Serialize, Deserialize)]
struct RawSequenceEntry {
    #[serde(default)]
    sequence: i64,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(rename = "tagFilter", default)]
    tag_filter: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    status: Value,
}

impl From<RawSequenceEntry> for PresetSequenceEntry {
    fn from(raw: RawSequenceEntry) -> Self {
        let mut entry = Self::new(raw.sequence, raw.kind, raw.status);
        entry.tag_filter = raw.tag_filter;
        entry
    }
}

impl From<PresetSequenceEntry> for RawSequenceEntry {
    fn from(entry: PresetSequenceEntry) -> Self {
        Self {
            sequence: entry.sequence,
            kind: entry.declared_type,
            tag_filter: entry.tag_filter,
            status: entry.status,
        }
    }
}
