//! Store boundary, write debouncing, and the remote-echo guard.
//!
//! DESIGN
//! ======
//! Outbound: every local mutation re-arms a single debounce deadline; when
//! the quiet period elapses the latest snapshot is written once, so rapid
//! mutations coalesce. A gesture-end commit flushes immediately, bypassing
//! the remaining delay, so gesture-final state is never lost to coalescing.
//! Consecutive identical snapshots are skipped.
//!
//! Inbound: change notifications are applied only while no position-mutating
//! gesture is active; otherwise they are dropped, not queued. Correctness is
//! recovered because the gesture's forced flush publishes fresh state that a
//! later notification will carry.
//!
//! ERROR HANDLING
//! ==============
//! Every failure here is locally recoverable. A failed write is logged and
//! the deadline re-armed so the next cycle retries; a malformed inbound
//! payload is discarded with local state kept. Nothing at this boundary may
//! abort an in-progress gesture.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::consts::WRITE_DEBOUNCE_MS;
use crate::doc::{Note, NoteStore};

/// Unique identifier for a board.
pub type BoardId = Uuid;

/// Failure reported by the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("board not found: {0}")]
    NotFound(BoardId),
    #[error("transient store failure: {0}")]
    Transient(String),
}

/// Failure at the sync boundary.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("malformed remote payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The remote key/value store holding each board's note collection.
///
/// Change notifications are not part of this trait: the host subscribes with
/// the external collaborator and delivers payloads into
/// [`crate::engine::Engine::on_remote`].
pub trait BoardStore {
    /// Fetch the full note collection for a board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown board, or
    /// [`StoreError::Transient`] on a failed read.
    fn get(&self, board_id: BoardId) -> Result<Vec<Note>, StoreError>;

    /// Write the full note collection for a board. With `merge` the store
    /// upserts by note id; without it the collection is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transient`] on a failed write.
    fn put(&mut self, board_id: BoardId, notes: &[Note], merge: bool) -> Result<(), StoreError>;
}

/// In-memory [`BoardStore`] for tests and local, offline boards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    boards: HashMap<BoardId, Vec<Note>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a board so `get` finds it.
    pub fn seed(&mut self, board_id: BoardId, notes: Vec<Note>) {
        self.boards.insert(board_id, notes);
    }
}

impl BoardStore for MemoryStore {
    fn get(&self, board_id: BoardId) -> Result<Vec<Note>, StoreError> {
        self.boards
            .get(&board_id)
            .cloned()
            .ok_or(StoreError::NotFound(board_id))
    }

    fn put(&mut self, board_id: BoardId, notes: &[Note], merge: bool) -> Result<(), StoreError> {
        let board = self.boards.entry(board_id).or_default();
        if merge {
            for incoming in notes {
                match board.iter_mut().find(|n| n.id == incoming.id) {
                    Some(existing) => *existing = incoming.clone(),
                    None => board.push(incoming.clone()),
                }
            }
        } else {
            *board = notes.to_vec();
        }
        Ok(())
    }
}

/// One-shot debounce deadline: either pending or armed-off.
///
/// Re-scheduling while pending replaces the deadline, which is what makes
/// rapid repeated triggers coalesce into a single fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the deadline at `now + delay`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Whether a deadline is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the armed deadline has passed.
    #[must_use]
    pub fn fired(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Disarm without firing.
    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

/// Outcome of delivering a remote change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteApply {
    /// The snapshot replaced local note state.
    Applied,
    /// The snapshot matched local state; nothing changed (no flicker).
    Unchanged,
    /// A position-mutating gesture is active; the notification was dropped.
    DroppedGestureActive,
    /// The payload failed shape validation and was discarded.
    RejectedMalformed,
}

/// Debounces outbound writes and gates inbound notifications.
#[derive(Debug, Clone)]
pub struct SyncGuard {
    timer: DebounceTimer,
    delay: Duration,
    last_pushed: Option<Vec<Note>>,
}

impl Default for SyncGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(WRITE_DEBOUNCE_MS))
    }

    /// Build a guard with a custom debounce delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self { timer: DebounceTimer::new(), delay, last_pushed: None }
    }

    /// Whether a debounced write is waiting to fire.
    #[must_use]
    pub fn is_write_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Record a local mutation: (re)arm the debounced write.
    pub fn schedule(&mut self, now: Instant) {
        self.timer.schedule(now, self.delay);
    }

    /// Fire the debounced write if its quiet period has elapsed.
    pub fn poll<S: BoardStore>(
        &mut self,
        now: Instant,
        board_id: BoardId,
        doc: &NoteStore,
        store: &mut S,
    ) {
        if self.timer.fired(now) {
            self.push(now, board_id, doc, store);
        }
    }

    /// Write immediately, bypassing any remaining delay. Called at gesture
    /// end so the terminal positions become durable without waiting.
    pub fn flush<S: BoardStore>(
        &mut self,
        now: Instant,
        board_id: BoardId,
        doc: &NoteStore,
        store: &mut S,
    ) {
        self.push(now, board_id, doc, store);
    }

    fn push<S: BoardStore>(
        &mut self,
        now: Instant,
        board_id: BoardId,
        doc: &NoteStore,
        store: &mut S,
    ) {
        let snapshot = doc.snapshot();
        if self.last_pushed.as_ref() == Some(&snapshot) {
            self.timer.clear();
            return;
        }
        // Full-snapshot replace, so local removals reach the store too.
        match store.put(board_id, &snapshot, false) {
            Ok(()) => {
                self.timer.clear();
                self.last_pushed = Some(snapshot);
            }
            Err(e) => {
                // Local state is kept; the re-armed deadline retries on the
                // next cycle.
                tracing::warn!(error = %e, %board_id, "remote write failed; retrying after debounce");
                self.timer.schedule(now, self.delay);
            }
        }
    }

    /// Deliver a remote change notification.
    ///
    /// Dropped while a position-mutating gesture is active; otherwise the
    /// payload is shape-validated as a note collection and, if it differs
    /// from local state, loaded as the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedPayload`] when the payload fails shape
    /// validation; local state is kept.
    pub fn apply_remote(
        &mut self,
        payload: &serde_json::Value,
        gesture_active: bool,
        doc: &mut NoteStore,
    ) -> Result<RemoteApply, SyncError> {
        if gesture_active {
            tracing::debug!("remote update dropped: gesture in progress");
            return Ok(RemoteApply::DroppedGestureActive);
        }

        let mut incoming: Vec<Note> = serde_json::from_value(payload.clone())?;
        incoming.sort_by(|a, b| a.id.cmp(&b.id));

        if incoming == doc.snapshot() {
            return Ok(RemoteApply::Unchanged);
        }

        doc.load_snapshot(incoming.clone());
        // What we just accepted is the store's current state; don't write
        // it straight back.
        self.last_pushed = Some(incoming);
        Ok(RemoteApply::Applied)
    }
}
