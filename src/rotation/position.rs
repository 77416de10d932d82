//! Rotation position tracking across presets and sequence entries.

/// Where the rotation currently stands.
///
/// Kept in memory only; a restart begins again at the first entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationPosition {
    current_preset_id: Option<i64>,
    sequence_counter: usize,
}

impl RotationPosition {
    /// A position that has not activated any preset yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last activated preset, `None` before the first activation or after a reset.
    pub fn current_preset_id(&self) -> Option<i64> {
        self.current_preset_id
    }

    /// Index of the next entry to emit (before wraparound).
    pub fn sequence_counter(&self) -> usize {
        self.sequence_counter
    }

    /// Forgets the active preset and rewinds to the first entry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Activates `preset_id`, rewinding to its first entry if it differs
    /// from the current one. Returns whether a switch happened.
    pub fn select_preset(&mut self, preset_id: i64) -> bool {
        if self.current_preset_id == Some(preset_id) {
            return false;
        }
        self.current_preset_id = Some(preset_id);
        self.sequence_counter = 0;
        true
    }

    /// Takes the next entry index for a preset with `len` entries and
    /// advances, wrapping back to 0 past the end.
    ///
    /// Returns `None` (without advancing) for an empty preset.
    pub fn advance(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if self.sequence_counter >= len {
            self.sequence_counter = 0;
        }
        let index = self.sequence_counter;
        self.sequence_counter += 1;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_position() {
        let position = RotationPosition::new();
        assert_eq!(position.current_preset_id(), None);
        assert_eq!(position.sequence_counter(), 0);
    }

    #[test]
    fn test_advance_wraps() {
        let mut position = RotationPosition::new();
        let indices: Vec<_> = (0..7).filter_map(|_| position.advance(3)).collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_advance_empty_preset() {
        let mut position = RotationPosition::new();
        assert_eq!(position.advance(0), None);
        assert_eq!(position.sequence_counter(), 0);
    }

    #[test]
    fn test_select_preset_rewinds_on_switch() {
        let mut position = RotationPosition::new();
        assert!(position.select_preset(1));
        position.advance(5);
        position.advance(5);

        assert!(!position.select_preset(1));
        assert_eq!(position.sequence_counter(), 2);

        assert!(position.select_preset(2));
        assert_eq!(position.current_preset_id(), Some(2));
        assert_eq!(position.sequence_counter(), 0);
    }

    #[test]
    fn test_advance_after_shrunk_preset() {
        let mut position = RotationPosition::new();
        position.select_preset(1);
        for _ in 0..4 {
            position.advance(5);
        }
        // Preset now only has two entries
        assert_eq!(position.advance(2), Some(0));
    }

    #[test]
    fn test_reset() {
        let mut position = RotationPosition::new();
        position.select_preset(3);
        position.advance(4);
        position.reset();
        assert_eq!(position, RotationPosition::new());
    }
}
