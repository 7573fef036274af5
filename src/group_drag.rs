//! Uniform multi-note drag session.
//!
//! On activation the session snapshots every selected note's world
//! position. Every subsequent report is `snapshot + shared delta` — the
//! offset is applied uniformly rather than re-derived per note, so the
//! selection's relative layout is preserved exactly. External position
//! changes arriving mid-session never reach the snapshot: the sync guard
//! drops remote updates while the gesture is active.

#[cfg(test)]
#[path = "group_drag_test.rs"]
mod group_drag_test;

use std::collections::HashSet;

use crate::camera::Point;
use crate::consts::DRAG_THRESHOLD_PX;
use crate::doc::{NoteId, NoteStore};

/// State of one group drag, from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct GroupDragSession {
    primary: NoteId,
    start_screen: Point,
    snapshot: Vec<(NoteId, Point)>,
    dragged: bool,
}

impl GroupDragSession {
    /// Begin a group drag anchored on `primary` (the note under the
    /// pointer), snapshotting the current position of every selected note.
    ///
    /// Returns `None` when fewer than two selected notes exist in the
    /// store — that is not a group session; the caller falls back to a
    /// single drag. Selected ids missing from the store are skipped.
    #[must_use]
    pub fn begin(
        primary: NoteId,
        selection: &HashSet<NoteId>,
        doc: &NoteStore,
        start_screen: Point,
    ) -> Option<Self> {
        let mut snapshot: Vec<(NoteId, Point)> = selection
            .iter()
            .filter_map(|id| doc.get(id).map(|n| (*id, Point::new(n.x, n.y))))
            .collect();
        if snapshot.len() < 2 {
            return None;
        }
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));
        Some(Self { primary, start_screen, snapshot, dragged: false })
    }

    /// The note that was under the pointer at activation.
    #[must_use]
    pub fn primary(&self) -> NoteId {
        self.primary
    }

    /// Ids of every note captured in the activation snapshot.
    #[must_use]
    pub fn members(&self) -> Vec<NoteId> {
        self.snapshot.iter().map(|(id, _)| *id).collect()
    }

    /// Whether the pointer has ever strayed past the click threshold.
    /// Monotonic for the session, as in a single drag.
    #[must_use]
    pub fn dragged(&self) -> bool {
        self.dragged
    }

    /// Advance the session to a new pointer position and return every
    /// member's world position for it, sorted by id.
    pub fn update(&mut self, screen: Point, zoom: f64) -> Vec<(NoteId, Point)> {
        let dx = screen.x - self.start_screen.x;
        let dy = screen.y - self.start_screen.y;
        if dx.hypot(dy) > DRAG_THRESHOLD_PX {
            self.dragged = true;
        }
        let world_dx = dx / zoom;
        let world_dy = dy / zoom;
        self.snapshot
            .iter()
            .map(|(id, start)| (*id, Point::new(start.x + world_dx, start.y + world_dy)))
            .collect()
    }
}
