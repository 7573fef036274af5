//! Hit-testing notes under a world point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::NOTE_SIZE;
use crate::doc::{NoteId, NoteStore};

/// Find the topmost note under `world_pt`, if any.
///
/// Notes are fixed-extent squares centered on their stored position.
/// Stacking follows id order — the latest id among overlapping notes wins.
#[must_use]
pub fn note_at(world_pt: Point, doc: &NoteStore) -> Option<NoteId> {
    let half = NOTE_SIZE / 2.0;
    doc.sorted_notes()
        .into_iter()
        .rev()
        .find(|note| {
            (world_pt.x - note.x).abs() <= half && (world_pt.y - note.y).abs() <= half
        })
        .map(|note| note.id)
}
