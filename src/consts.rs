//! Shared numeric constants for the interaction engine.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom step for discrete controls (toolbar +/- buttons).
pub const ZOOM_STEP: f64 = 0.2;

/// Zoom step per wheel notch for continuous scroll input.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

// ── Gestures ────────────────────────────────────────────────────

/// Screen-space displacement in pixels beyond which a press counts as a
/// drag rather than a click.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Side length of a note in world units. Notes are squares centered on
/// their stored position.
pub const NOTE_SIZE: f64 = 192.0;

// ── Lasso ───────────────────────────────────────────────────────

/// Screen-space padding applied to the lasso path's bounding box.
pub const LASSO_BOX_PADDING_PX: f64 = 20.0;

/// Screen-space radius within which a note counts as near the lasso path.
pub const LASSO_PATH_RADIUS_PX: f64 = 60.0;

// ── Sync ────────────────────────────────────────────────────────

/// Quiet period before a debounced remote write fires, in milliseconds.
pub const WRITE_DEBOUNCE_MS: u64 = 100;
