//! Top-level interaction engine.
//!
//! [`EngineCore`] is the pure state machine: it owns the document, camera,
//! selection, and active gesture, and turns pointer events into state
//! mutations plus [`Action`]s for the host. It performs no I/O and takes no
//! clock, which keeps every interaction testable as plain function calls.
//!
//! [`Engine`] wraps a core together with a [`BoardStore`] and a
//! [`SyncGuard`], wiring gesture activity to debounced writes, forced
//! flushes at commit, and the drop-while-dragging gate on inbound remote
//! updates. Hosts drive it with pointer events, a periodic [`Engine::tick`],
//! and [`Engine::on_remote`] deliveries.
//!
//! DISPATCH
//! ========
//! All pointer-downs funnel through one decision ladder, checked in order:
//!
//! 1. shift + primary: lasso (selection cleared at start);
//! 2. middle button, or ctrl/meta + primary: camera pan;
//! 3. primary over a note in a multi-note selection: group drag;
//! 4. primary over any other note: single drag (foreign selection cleared);
//! 5. primary over empty canvas: camera pan.
//!
//! A release within the click threshold reports a click ([`Action::NoteClicked`]
//! or [`Action::CanvasClicked`]) instead of a movement.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;
use std::mem;
use std::time::Instant;

use crate::camera::{Camera, Point};
use crate::consts::DRAG_THRESHOLD_PX;
use crate::doc::{Note, NoteId, NoteStore};
use crate::drag::DragSession;
use crate::group_drag::GroupDragSession;
use crate::hit;
use crate::input::{Button, Gesture, Modifiers, WheelDelta};
use crate::lasso::LassoSession;
use crate::sync::{BoardId, BoardStore, RemoteApply, SyncError, SyncGuard};

/// What the host should do in response to an input event.
///
/// Handlers return zero or more actions; order matters (a commit precedes
/// the click derived from the same release).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A single drag ended; the note's final position is authoritative.
    NoteCommitted { id: NoteId, x: f64, y: f64 },
    /// A group drag ended; every member's final position, as one batch.
    NotesCommitted { moves: Vec<(NoteId, f64, f64)> },
    /// The selection set changed; re-read it via [`EngineCore::selection`].
    SelectionChanged,
    /// A press-and-release on a note without crossing the drag threshold.
    NoteClicked(NoteId),
    /// A press-and-release on empty canvas without crossing the threshold.
    /// Carries the world-space point.
    CanvasClicked(Point),
    /// Visible state changed; the host should redraw.
    RenderNeeded,
}

/// Pure interaction state machine: document, camera, selection, gesture.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub doc: NoteStore,
    pub camera: Camera,
    selection: HashSet<NoteId>,
    gesture: Gesture,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected note ids.
    #[must_use]
    pub fn selection(&self) -> &HashSet<NoteId> {
        &self.selection
    }

    /// The active gesture.
    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The in-progress lasso path, for rendering the sweep overlay.
    #[must_use]
    pub fn lasso_path(&self) -> Option<&[Point]> {
        match &self.gesture {
            Gesture::Lassoing(session) => Some(session.path()),
            _ => None,
        }
    }

    /// Clear the selection. Emits [`Action::SelectionChanged`] only when
    /// something was actually selected.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.selection.clear();
        vec![Action::SelectionChanged]
    }

    /// Drop selected ids that no longer exist in the document.
    pub fn prune_selection(&mut self) -> Vec<Action> {
        let before = self.selection.len();
        let doc = &self.doc;
        self.selection.retain(|id| doc.get(id).is_some());
        if self.selection.len() == before {
            Vec::new()
        } else {
            vec![Action::SelectionChanged]
        }
    }

    /// Handle a pointer-down. Ignored unless idle: a second contact during
    /// an active gesture must not spawn a competing session.
    pub fn on_pointer_down(
        &mut self,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);

        if button == Button::Primary && modifiers.shift {
            let mut actions = self.clear_selection();
            self.gesture = Gesture::Lassoing(LassoSession::begin(world));
            actions.push(Action::RenderNeeded);
            return actions;
        }

        if button == Button::Middle
            || (button == Button::Primary && (modifiers.ctrl || modifiers.meta))
        {
            self.gesture = Gesture::Panning { start_screen: screen, last_screen: screen };
            return vec![Action::RenderNeeded];
        }

        if button != Button::Primary {
            return Vec::new();
        }

        let Some(id) = hit::note_at(world, &self.doc) else {
            self.gesture = Gesture::Panning { start_screen: screen, last_screen: screen };
            return vec![Action::RenderNeeded];
        };

        if self.selection.contains(&id) && self.selection.len() > 1 {
            if let Some(session) =
                GroupDragSession::begin(id, &self.selection, &self.doc, screen)
            {
                self.gesture = Gesture::DraggingSelection(session);
                return vec![Action::RenderNeeded];
            }
        }

        let mut actions = Vec::new();
        if !self.selection.contains(&id) {
            actions.extend(self.clear_selection());
        }
        if let Some(note) = self.doc.get(&id) {
            let start_world = Point::new(note.x, note.y);
            self.gesture = Gesture::DraggingNote(DragSession::begin(id, screen, start_world));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Handle a pointer move, routed by the active gesture. Drag positions
    /// are applied to the document immediately (optimistic rendering);
    /// durability is the sync layer's problem.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let zoom = self.camera.zoom();
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::DraggingNote(session) => {
                let id = session.note_id();
                let pos = session.update(screen, zoom);
                self.doc.set_position(&id, pos.x, pos.y);
                vec![Action::RenderNeeded]
            }
            Gesture::DraggingSelection(session) => {
                let moves = session.update(screen, zoom);
                for (id, pos) in &moves {
                    self.doc.set_position(id, pos.x, pos.y);
                }
                vec![Action::RenderNeeded]
            }
            Gesture::Lassoing(session) => {
                session.push(self.camera.screen_to_world(screen));
                vec![Action::RenderNeeded]
            }
            Gesture::Panning { last_screen, .. } => {
                let dx = screen.x - last_screen.x;
                let dy = screen.y - last_screen.y;
                *last_screen = screen;
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Handle a pointer-up: finish the active gesture and return to idle.
    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        let zoom = self.camera.zoom();
        match mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            Gesture::DraggingNote(mut session) => {
                let id = session.note_id();
                let pos = session.update(screen, zoom);
                self.doc.set_position(&id, pos.x, pos.y);
                let mut actions = vec![Action::NoteCommitted { id, x: pos.x, y: pos.y }];
                if !session.dragged() {
                    actions.push(Action::NoteClicked(id));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            Gesture::DraggingSelection(mut session) => {
                let moves = session.update(screen, zoom);
                for (id, pos) in &moves {
                    self.doc.set_position(id, pos.x, pos.y);
                }
                let batch = moves.iter().map(|(id, p)| (*id, p.x, p.y)).collect();
                let mut actions = vec![Action::NotesCommitted { moves: batch }];
                if !session.dragged() {
                    actions.push(Action::NoteClicked(session.primary()));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            Gesture::Lassoing(mut session) => {
                session.push(self.camera.screen_to_world(screen));
                self.selection = session.select(&self.doc, &self.camera);
                vec![Action::SelectionChanged, Action::RenderNeeded]
            }
            Gesture::Panning { start_screen, last_screen } => {
                self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                let total_dx = screen.x - start_screen.x;
                let total_dy = screen.y - start_screen.y;
                let mut actions = Vec::new();
                if total_dx.hypot(total_dy) <= DRAG_THRESHOLD_PX {
                    actions.extend(self.clear_selection());
                    actions.push(Action::CanvasClicked(self.camera.screen_to_world(screen)));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// Handle a wheel scroll: vertical delta drives zoom.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.camera.apply_wheel(delta.dy);
        vec![Action::RenderNeeded]
    }
}

/// Store-backed engine: an [`EngineCore`] plus the sync machinery.
///
/// Every mutating entry point takes `now` so hosts own the clock; tests
/// drive time explicitly.
#[derive(Debug)]
pub struct Engine<S: BoardStore> {
    core: EngineCore,
    guard: SyncGuard,
    store: S,
    board_id: BoardId,
}

impl<S: BoardStore> Engine<S> {
    #[must_use]
    pub fn new(board_id: BoardId, store: S) -> Self {
        Self { core: EngineCore::new(), guard: SyncGuard::new(), store, board_id }
    }

    /// Read-only view of the interaction state.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a debounced write is waiting to fire.
    #[must_use]
    pub fn is_write_pending(&self) -> bool {
        self.guard.is_write_pending()
    }

    /// Hydrate the document from the store.
    ///
    /// # Errors
    ///
    /// Propagates the store's read failure; local state is left untouched.
    pub fn load(&mut self) -> Result<(), SyncError> {
        let notes = self.store.get(self.board_id)?;
        self.core.doc.load_snapshot(notes);
        Ok(())
    }

    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
        _now: Instant,
    ) -> Vec<Action> {
        self.core.on_pointer_down(screen, button, modifiers)
    }

    pub fn pointer_move(&mut self, screen: Point, now: Instant) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen);
        if self.core.gesture.blocks_remote() {
            self.guard.schedule(now);
        }
        actions
    }

    pub fn pointer_up(&mut self, screen: Point, now: Instant) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen);
        let committed = actions.iter().any(|a| {
            matches!(a, Action::NoteCommitted { .. } | Action::NotesCommitted { .. })
        });
        if committed {
            self.guard.flush(now, self.board_id, &self.core.doc, &mut self.store);
        }
        actions
    }

    pub fn wheel(&mut self, delta: WheelDelta, _now: Instant) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    /// Move a note directly (editor nudge, keyboard move) and schedule the
    /// debounced write.
    pub fn set_note_position(&mut self, id: NoteId, x: f64, y: f64, now: Instant) -> Vec<Action> {
        if !self.core.doc.set_position(&id, x, y) {
            return Vec::new();
        }
        self.guard.schedule(now);
        vec![Action::RenderNeeded]
    }

    /// Create or replace a note and schedule the debounced write.
    pub fn upsert_note(&mut self, note: Note, now: Instant) -> Vec<Action> {
        self.core.doc.insert(note);
        self.guard.schedule(now);
        vec![Action::RenderNeeded]
    }

    /// Delete a note and schedule the debounced write.
    pub fn remove_note(&mut self, id: NoteId, now: Instant) -> Vec<Action> {
        if self.core.doc.remove(&id).is_none() {
            return Vec::new();
        }
        self.guard.schedule(now);
        let mut actions = self.core.prune_selection();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set the zoom factor (toolbar slider). Out-of-range values clamp.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.core.camera.set_zoom(zoom);
    }

    /// Discrete zoom-in step (toolbar control).
    pub fn zoom_in(&mut self) {
        self.core.camera.zoom_in();
    }

    /// Discrete zoom-out step (toolbar control).
    pub fn zoom_out(&mut self) {
        self.core.camera.zoom_out();
    }

    /// Pan the camera by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.core.camera.pan_by(dx, dy);
    }

    /// Restore the default view (zoom 1.0, zero pan).
    pub fn reset_view(&mut self) {
        self.core.camera.reset();
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.core.clear_selection()
    }

    /// Periodic driver: fires the debounced write once its quiet period has
    /// elapsed.
    pub fn tick(&mut self, now: Instant) {
        self.guard.poll(now, self.board_id, &self.core.doc, &mut self.store);
    }

    /// Deliver a remote change notification from the host's subscription.
    ///
    /// Malformed payloads are logged and discarded; they never tear down
    /// local state or the subscription.
    pub fn on_remote(&mut self, payload: &serde_json::Value) -> (RemoteApply, Vec<Action>) {
        let gesture_active = self.core.gesture.blocks_remote();
        match self.guard.apply_remote(payload, gesture_active, &mut self.core.doc) {
            Ok(RemoteApply::Applied) => {
                let mut actions = self.core.prune_selection();
                actions.push(Action::RenderNeeded);
                (RemoteApply::Applied, actions)
            }
            Ok(outcome) => (outcome, Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, board_id = %self.board_id, "discarding malformed remote update");
                (RemoteApply::RejectedMalformed, Vec::new())
            }
        }
    }
}
