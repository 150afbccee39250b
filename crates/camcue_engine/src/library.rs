// SPDX-License-Identifier: MIT OR Apache-2.0
//! The named sequence library and its on-disk JSON form.
//!
//! The file is a single JSON object mapping sequence name to an ordered
//! list of step records. Saving merges with whatever is already on
//! disk; loading replaces the in-memory set, or fetches one sequence by
//! name.

use crate::sequence::{Mapping, Sequence};
use indexmap::IndexMap;
use std::path::Path;

/// Errors from library persistence.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The sequence file could not be read or written.
    #[error("sequence file error: {0}")]
    Io(#[from] std::io::Error),

    /// The sequence file contents were not valid JSON.
    #[error("sequence file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested sequence name is not in the file.
    #[error("no sequence named {0:?}")]
    SequenceNotFound(String),
}

/// What the sequence file holds: name -> ordered step records.
type DiskSet = IndexMap<String, Vec<Mapping>>;

/// The set of authored sequences, keyed by display name.
#[derive(Debug, Clone, Default)]
pub struct SequenceLibrary {
    sequences: IndexMap<String, Sequence>,
}

impl SequenceLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a sequence under its own name.
    pub fn insert(&mut self, sequence: Sequence) {
        self.sequences.insert(sequence.name.clone(), sequence);
    }

    /// Add a new empty sequence; refuses an empty or duplicate name.
    pub fn add_empty(&mut self, name: &str) -> bool {
        if name.is_empty() || self.sequences.contains_key(name) {
            return false;
        }
        self.sequences.insert(name.to_string(), Sequence::new(name));
        true
    }

    /// Remove a sequence by name.
    pub fn remove(&mut self, name: &str) -> Option<Sequence> {
        self.sequences.shift_remove(name)
    }

    /// Rename a sequence in place, keeping its list position; refuses
    /// an empty name or a collision.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if new.is_empty() || new == old || self.sequences.contains_key(new) {
            return false;
        }
        if !self.sequences.contains_key(old) {
            return false;
        }

        self.sequences = self
            .sequences
            .drain(..)
            .map(|(name, mut sequence)| {
                if name == old {
                    sequence.name = new.to_string();
                    (new.to_string(), sequence)
                } else {
                    (name, sequence)
                }
            })
            .collect();
        true
    }

    /// Get a sequence by name.
    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.sequences.get(name)
    }

    /// Get a mutable sequence by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Sequence> {
        self.sequences.get_mut(name)
    }

    /// Whether a sequence with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Sequence names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    /// Number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Write every sequence to `path`, merging with what is already
    /// there: in-memory sequences win on name collisions, on-disk-only
    /// names survive. A failed save leaves in-memory state untouched.
    pub fn save_to(&self, path: &Path) -> Result<(), LibraryError> {
        let mut on_disk = match read_disk(path) {
            Ok(set) => set,
            Err(LibraryError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                DiskSet::new()
            }
            Err(err) => {
                tracing::warn!("existing sequence file is unreadable, replacing it: {err}");
                DiskSet::new()
            }
        };

        for (name, sequence) in &self.sequences {
            on_disk.insert(name.clone(), sequence.steps.clone());
        }

        let json = serde_json::to_string_pretty(&on_disk)?;
        std::fs::write(path, json)?;
        tracing::info!("saved {} sequences to {}", on_disk.len(), path.display());
        Ok(())
    }

    /// Load the whole on-disk set.
    pub fn load_from(path: &Path) -> Result<Self, LibraryError> {
        let on_disk = read_disk(path)?;
        let mut library = Self::new();
        for (name, steps) in on_disk {
            let sequence = Sequence::with_steps(name.clone(), steps);
            library.sequences.insert(name, sequence);
        }
        tracing::info!(
            "loaded {} sequences from {}",
            library.len(),
            path.display()
        );
        Ok(library)
    }

    /// Fetch one named sequence from disk.
    pub fn load_named(path: &Path, name: &str) -> Result<Sequence, LibraryError> {
        let mut on_disk = read_disk(path)?;
        match on_disk.shift_remove(name) {
            Some(steps) => Ok(Sequence::with_steps(name, steps)),
            None => Err(LibraryError::SequenceNotFound(name.to_string())),
        }
    }
}

fn read_disk(path: &Path) -> Result<DiskSet, LibraryError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CameraAction;
    use crate::event::GameEvent;

    fn sample_sequence(name: &str) -> Sequence {
        Sequence::with_steps(
            name,
            vec![
                Mapping::new(GameEvent::Jump, CameraAction::AdjustYaw, 0.0, 50.0),
                Mapping::new(GameEvent::Flip, CameraAction::ToggleReverseCam, 1.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");

        let mut library = SequenceLibrary::new();
        library.insert(sample_sequence("Aerial Shot"));
        library.save_to(&path).unwrap();

        let loaded = SequenceLibrary::load_from(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded.get("Aerial Shot").unwrap().steps,
            library.get("Aerial Shot").unwrap().steps
        );
    }

    #[test]
    fn test_save_merges_with_on_disk_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");

        let mut first = SequenceLibrary::new();
        first.insert(sample_sequence("Kept"));
        first.insert(sample_sequence("Replaced"));
        first.save_to(&path).unwrap();

        let mut second = SequenceLibrary::new();
        let mut replacement = Sequence::new("Replaced");
        replacement.add_step(Mapping::new(
            GameEvent::BallTouch,
            CameraAction::ToggleBallCam,
            0.5,
            1.0,
        ));
        second.insert(replacement.clone());
        second.save_to(&path).unwrap();

        let merged = SequenceLibrary::load_from(&path).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("Kept").unwrap().len(), 2);
        assert_eq!(merged.get("Replaced").unwrap().steps, replacement.steps);
    }

    #[test]
    fn test_load_named_reports_missing_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");

        let mut library = SequenceLibrary::new();
        library.insert(sample_sequence("Exists"));
        library.save_to(&path).unwrap();

        let found = SequenceLibrary::load_named(&path, "Exists").unwrap();
        assert_eq!(found.len(), 2);

        let missing = SequenceLibrary::load_named(&path, "Absent");
        assert!(matches!(missing, Err(LibraryError::SequenceNotFound(_))));
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            SequenceLibrary::load_from(&path),
            Err(LibraryError::Io(_))
        ));
    }

    #[test]
    fn test_load_unparseable_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");
        std::fs::write(&path, "not json {").unwrap();

        assert!(matches!(
            SequenceLibrary::load_from(&path),
            Err(LibraryError::Parse(_))
        ));
    }

    #[test]
    fn test_save_replaces_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");
        std::fs::write(&path, "not json {").unwrap();

        let mut library = SequenceLibrary::new();
        library.insert(sample_sequence("Fresh"));
        library.save_to(&path).unwrap();

        let loaded = SequenceLibrary::load_from(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("Fresh"));
    }

    #[test]
    fn test_unknown_names_survive_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequences.json");
        std::fs::write(
            &path,
            r#"{"Future": [{"eventName": "Teleport", "actionName": "Zoom Out", "delay": 0.5, "customValue": 1.0}]}"#,
        )
        .unwrap();

        let library = SequenceLibrary::load_from(&path).unwrap();
        let sequence = library.get("Future").unwrap();
        assert_eq!(
            sequence.steps[0].event,
            GameEvent::Unknown("Teleport".to_string())
        );
        assert_eq!(
            sequence.steps[0].action,
            CameraAction::Unknown("Zoom Out".to_string())
        );
    }

    #[test]
    fn test_rename_keeps_position_and_refuses_collisions() {
        let mut library = SequenceLibrary::new();
        library.add_empty("First");
        library.add_empty("Second");
        library.add_empty("Third");

        assert!(!library.rename("First", "Second"));
        assert!(!library.rename("Missing", "Anything"));
        assert!(library.rename("Second", "Renamed"));

        let names: Vec<_> = library.names().collect();
        assert_eq!(names, vec!["First", "Renamed", "Third"]);
        assert_eq!(library.get("Renamed").unwrap().name, "Renamed");
    }

    #[test]
    fn test_add_empty_refuses_duplicates() {
        let mut library = SequenceLibrary::new();
        assert!(library.add_empty("One"));
        assert!(!library.add_empty("One"));
        assert!(!library.add_empty(""));
        assert_eq!(library.len(), 1);
    }
}
