//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a
//! pointer event. `Gesture` is the active interaction being tracked between
//! pointer-down and pointer-up; each variant carries the session context
//! needed to compute deltas and emit final document mutations on release.
//! Exactly one gesture can be active at a time — the enum makes concurrent
//! sessions unrepresentable.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::drag::DragSession;
use crate::group_drag::GroupDragSession;
use crate::lasso::LassoSession;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier. Touch contacts report as `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button or single-finger touch.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button or two-finger tap.
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The active gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving a single note.
    DraggingNote(DragSession),
    /// Moving every member of a multi-note selection by one shared delta.
    DraggingSelection(GroupDragSession),
    /// Sweeping a freehand lasso path to build a new selection.
    Lassoing(LassoSession),
    /// Panning the camera.
    Panning {
        /// Screen position at pointer-down, used for click-vs-pan detection.
        start_screen: Point,
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
}

impl Gesture {
    /// Returns `true` if no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while a gesture that mutates note positions is active.
    ///
    /// Remote change notifications must be dropped while this holds, so an
    /// echo of our own optimistic writes can't yank notes out from under the
    /// pointer. Lasso and pan don't touch note positions and don't block.
    #[must_use]
    pub fn blocks_remote(&self) -> bool {
        matches!(self, Self::DraggingNote(_) | Self::DraggingSelection(_))
    }
}
