//! Document model: notes and the in-memory store.
//!
//! This module defines the note type as it lives in memory and on the wire
//! (`Note`), and the runtime store that owns all live notes (`NoteStore`).
//! Data flows into this layer from the remote store (snapshot hydration and
//! change notifications, gated by [`crate::sync::SyncGuard`]) and from the
//! input engine (optimistic position mutations during gestures).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a note.
pub type NoteId = Uuid;

/// A sticky note as stored in the document and on the wire.
///
/// `x` / `y` are the note's **center** in world coordinates; rendering and
/// hit-testing both treat the note as a fixed-size square around that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for this note.
    pub id: NoteId,
    /// Short heading shown at the top of the note.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Paper color name (e.g. `"yellow"`, `"pink"`).
    pub color: String,
    /// Center x in world coordinates.
    pub x: f64,
    /// Center y in world coordinates.
    pub y: f64,
    /// Resting tilt in degrees, purely cosmetic.
    pub rotation: f64,
}

/// In-memory store of the board's notes.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: HashMap<NoteId, Note>,
}

impl NoteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a note. A note with the same `id` is overwritten.
    pub fn insert(&mut self, note: Note) {
        self.notes.insert(note.id, note);
    }

    /// Remove a note by id, returning it if it was present.
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        self.notes.remove(id)
    }

    /// Return a reference to a note by id.
    #[must_use]
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Return a mutable reference to a note by id.
    pub fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    /// Move a note's center to a new world position. Returns false if the
    /// note doesn't exist.
    pub fn set_position(&mut self, id: &NoteId, x: f64, y: f64) -> bool {
        let Some(note) = self.notes.get_mut(id) else {
            return false;
        };
        note.x = x;
        note.y = y;
        true
    }

    /// Replace all notes with a full snapshot.
    pub fn load_snapshot(&mut self, notes: Vec<Note>) {
        self.notes.clear();
        for note in notes {
            self.notes.insert(note.id, note);
        }
    }

    /// Full copy of the store sorted by id — the canonical wire and
    /// stacking order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.values().cloned().collect();
        notes.sort_by(|a, b| a.id.cmp(&b.id));
        notes
    }

    /// References to all notes sorted by id.
    #[must_use]
    pub fn sorted_notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| a.id.cmp(&b.id));
        notes
    }

    /// Number of notes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if the store contains no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
