//! The status rotation loop.
//!
//! [`RotationEngine`] owns the loaded configuration, the rotation position,
//! and the settings-file snapshot used for hot reload. Each [`tick`] runs one
//! iteration of the loop:
//!
//! 1. reload everything if `settings.json` changed (resetting the position),
//! 2. back off while no settings exist, sleep while inactive,
//! 3. pick the next entry of the active preset (wrapping at the end),
//! 4. resolve it to an emoji and one or more text lines,
//! 5. publish each line with live variables substituted, checking for a
//!    settings change after every publish.
//!
//! The loop is blocking and single-threaded; all waiting goes through a
//! [`Sleeper`] so tests can drive it without real time passing.
//!
//! [`tick`]: RotationEngine::tick

pub mod position;

pub use position::RotationPosition;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{ConfigStore, FileSnapshot};
use crate::constants::IDLE_BACKOFF;
use crate::models::{ConfigSet, EntryKind, PresetSequenceEntry};
use crate::services::{StatusPublisher, VariableSource};

/// Blocking wait between loop steps.
pub trait Sleeper {
    /// Waits for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// [`Sleeper`] backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No settings entry is present.
    Idle,
    /// The settings entry is inactive.
    Inactive,
    /// The active preset id does not exist.
    PresetMissing(i64),
    /// The active preset has no entries.
    EmptyPreset(i64),
    /// Every line of the entry was published.
    Published {
        /// Number of lines published
        lines: usize,
    },
    /// A settings change was detected mid-entry; remaining lines were dropped.
    Interrupted {
        /// Number of lines published before the change
        published: usize,
    },
}

/// An entry resolved to concrete template strings.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedEntry {
    emoji: String,
    lines: Vec<String>,
}

impl ResolvedEntry {
    fn empty() -> Self {
        Self {
            emoji: String::new(),
            lines: vec![String::new()],
        }
    }
}

/// Resolves a sequence entry against the loaded status templates.
///
/// Every failure (unknown id, empty candidate set, malformed or unknown
/// entry) resolves to a single empty line.
fn resolve_entry(config: &ConfigSet, entry: &PresetSequenceEntry) -> ResolvedEntry {
    let status_id = match &entry.kind {
        EntryKind::Static(id) => id.as_str(),
        EntryKind::Random(ids) => match ids.choose(&mut rand::thread_rng()) {
            Some(id) => id.as_str(),
            None => {
                debug!(sequence = entry.sequence, "Random entry has no candidates");
                return ResolvedEntry::empty();
            }
        },
        EntryKind::None => return ResolvedEntry::empty(),
        EntryKind::Unknown(kind) => {
            warn!(sequence = entry.sequence, "Unknown sequence type: {kind}");
            return ResolvedEntry::empty();
        }
        EntryKind::Malformed { declared, reason } => {
            warn!(
                sequence = entry.sequence,
                "Malformed {declared} entry ({reason}), publishing empty status"
            );
            return ResolvedEntry::empty();
        }
    };

    match config.status(status_id) {
        Some(status) => ResolvedEntry {
            emoji: status.emoji.clone(),
            lines: status.lines(),
        },
        None => {
            warn!(sequence = entry.sequence, "Status {status_id} not found");
            ResolvedEntry::empty()
        }
    }
}

/// The rotation state machine.
pub struct RotationEngine<P, V, S> {
    store: ConfigStore,
    config: ConfigSet,
    position: RotationPosition,
    settings_snapshot: FileSnapshot,
    publisher: P,
    variables: V,
    sleeper: S,
}

impl<P, V, S> RotationEngine<P, V, S>
where
    P: StatusPublisher,
    V: VariableSource,
    S: Sleeper,
{
    /// Loads the initial configuration and builds the engine.
    ///
    /// A failed initial load is fatal: malformed configuration at startup
    /// does not heal by retrying.
    pub fn start(store: ConfigStore, publisher: P, variables: V, sleeper: S) -> Result<Self> {
        let config = store.load().with_context(|| {
            format!(
                "Failed to load configuration from {}",
                store.dir().display()
            )
        })?;

        info!("Status rotation started ({})", store.dir().display());

        Ok(Self {
            store,
            config,
            position: RotationPosition::new(),
            settings_snapshot: FileSnapshot::new(),
            publisher,
            variables,
            sleeper,
        })
    }

    /// Runs the loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// The configuration currently in use.
    pub fn config(&self) -> &ConfigSet {
        &self.config
    }

    /// The current rotation position.
    pub fn position(&self) -> RotationPosition {
        self.position
    }

    /// The publisher, for inspection.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// The variable source, for inspection.
    pub fn variables(&self) -> &V {
        &self.variables
    }

    /// The sleeper, for inspection.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Runs one iteration of the loop.
    pub fn tick(&mut self) -> Tick {
        self.reload_if_changed();

        let Some(settings) = self.config.active_settings().cloned() else {
            debug!("No settings present, backing off");
            self.sleeper.sleep(IDLE_BACKOFF);
            return Tick::Idle;
        };

        let interval = settings.interval();
        if !settings.active {
            self.sleeper.sleep(interval);
            return Tick::Inactive;
        }

        if self.position.select_preset(settings.preset_id) {
            info!("Switched to preset {}", settings.preset_id);
        }

        let Some(preset) = self.config.preset(settings.preset_id) else {
            warn!("Preset {} not found", settings.preset_id);
            self.sleeper.sleep(interval);
            return Tick::PresetMissing(settings.preset_id);
        };

        let Some(index) = self.position.advance(preset.statuses.len()) else {
            warn!("Preset {} has no entries", settings.preset_id);
            self.sleeper.sleep(interval);
            return Tick::EmptyPreset(settings.preset_id);
        };

        let entry = resolve_entry(&self.config, &preset.statuses[index]);
        let location = settings.primary_location();

        let mut published = 0;
        for line in &entry.lines {
            let variables = self.variables.resolve(location);
            let (emoji, text) = variables.apply(&entry.emoji, line);
            self.publisher.publish(&emoji, &text);
            published += 1;

            if self.reload_if_changed() {
                info!("Configuration changed mid-cycle, dropping remaining lines");
                return Tick::Interrupted { published };
            }

            self.sleeper.sleep(interval);
        }

        Tick::Published { lines: published }
    }

    /// Reloads all documents if the settings file changed.
    ///
    /// Returns whether a change was detected, whether or not the reload
    /// itself succeeded. A failed reload keeps the previous configuration
    /// and position.
    fn reload_if_changed(&mut self) -> bool {
        if !self.store.settings_changed(&mut self.settings_snapshot) {
            return false;
        }

        match self.store.load() {
            Ok(config) => {
                info!("Configuration changed, reloaded");
                self.config = config;
                self.position.reset();
            }
            Err(e) => warn!("Configuration changed but failed to reload, keeping previous: {e:#}"),
        }
        true
    }
}
