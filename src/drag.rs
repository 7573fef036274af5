//! Single-note drag session.
//!
//! A session captures the screen point and the note's world position at
//! pointer-down; both stay fixed for the session's lifetime. Every move
//! derives the note's position from those start values plus the current
//! pointer, so intermediate reports can be throttled by the host without
//! affecting the final committed position.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::camera::Point;
use crate::consts::DRAG_THRESHOLD_PX;
use crate::doc::NoteId;

/// State of one single-note drag, from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct DragSession {
    note_id: NoteId,
    start_screen: Point,
    start_world: Point,
    dragged: bool,
}

impl DragSession {
    /// Begin a drag on `note_id`, recording the pointer's screen position
    /// and the note's current world position.
    #[must_use]
    pub fn begin(note_id: NoteId, start_screen: Point, start_world: Point) -> Self {
        Self { note_id, start_screen, start_world, dragged: false }
    }

    /// The note this session is moving.
    #[must_use]
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Whether the pointer has ever strayed past the click threshold.
    ///
    /// Once set this never resets; a release within the threshold is a
    /// click, not a drag.
    #[must_use]
    pub fn dragged(&self) -> bool {
        self.dragged
    }

    /// Advance the session to a new pointer position and return the note's
    /// world position for it.
    ///
    /// The screen delta is divided by `zoom` so cursor tracking feels 1:1
    /// at any camera scale. The threshold test uses the raw screen-space
    /// magnitude.
    pub fn update(&mut self, screen: Point, zoom: f64) -> Point {
        let dx = screen.x - self.start_screen.x;
        let dy = screen.y - self.start_screen.y;
        if dx.hypot(dy) > DRAG_THRESHOLD_PX {
            self.dragged = true;
        }
        Point {
            x: self.start_world.x + dx / zoom,
            y: self.start_world.y + dy / zoom,
        }
    }
}
