#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_STEP, ZOOM_STEP};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the board.
///
/// `pan_x` / `pan_y` are in screen pixels and are never scaled by zoom.
/// `zoom` is a scale factor clamped to `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current zoom factor, always within `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom factor, clamping to the allowed range. Out-of-range
    /// requests are clamped silently, never an error.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Adjust the zoom factor by `delta`, clamping to the allowed range.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Discrete zoom-in step (toolbar control).
    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    /// Discrete zoom-out step (toolbar control).
    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    /// Apply a wheel scroll: scrolling down (`dy > 0`) zooms out one wheel
    /// step, scrolling up zooms in.
    pub fn apply_wheel(&mut self, dy: f64) {
        let delta = if dy > 0.0 { -WHEEL_ZOOM_STEP } else { WHEEL_ZOOM_STEP };
        self.zoom_by(delta);
    }

    /// Pan by a screen-space delta. Panning adds directly in screen pixels
    /// and is never scaled by zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Restore zoom 1.0 and zero pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
