//! Freehand lasso selection.
//!
//! A session accumulates the pointer's world-space path while the gesture
//! is active. On release, membership is the union of three tests:
//!
//! 1. even-odd polygon containment over the path treated as closed
//!    (needs at least 3 points);
//! 2. the path's axis-aligned bounding box padded by a constant screen
//!    distance;
//! 3. proximity to any path segment within a constant screen distance
//!    (needs at least 2 points).
//!
//! Pure containment fails for the thin, fast, or open strokes freehand
//! input produces; the union keeps selection forgiving without requiring a
//! closed shape. Both pixel thresholds are converted to world units at the
//! current zoom so the forgiveness is constant on screen.

#[cfg(test)]
#[path = "lasso_test.rs"]
mod lasso_test;

use std::collections::HashSet;

use crate::camera::{Camera, Point};
use crate::consts::{LASSO_BOX_PADDING_PX, LASSO_PATH_RADIUS_PX};
use crate::doc::{NoteId, NoteStore};

/// State of one lasso sweep, from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct LassoSession {
    path: Vec<Point>,
}

impl LassoSession {
    /// Begin a sweep at a world-space point.
    #[must_use]
    pub fn begin(world: Point) -> Self {
        Self { path: vec![world] }
    }

    /// Append the current world-space pointer position. The path is
    /// append-only for the session's lifetime.
    pub fn push(&mut self, world: Point) {
        self.path.push(world);
    }

    /// The world-space path swept so far, for rendering.
    #[must_use]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Compute the selection for the swept path.
    ///
    /// A path of fewer than 2 points selects nothing.
    #[must_use]
    pub fn select(&self, doc: &NoteStore, camera: &Camera) -> HashSet<NoteId> {
        if self.path.len() < 2 {
            return HashSet::new();
        }

        let padding = camera.screen_dist_to_world(LASSO_BOX_PADDING_PX);
        let near_radius = camera.screen_dist_to_world(LASSO_PATH_RADIUS_PX);

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.path {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        min_x -= padding;
        max_x += padding;
        min_y -= padding;
        max_y += padding;

        let closed_enough = self.path.len() >= 3;

        doc.sorted_notes()
            .into_iter()
            .filter(|note| {
                let pt = Point::new(note.x, note.y);
                let in_polygon = closed_enough && point_in_polygon(pt, &self.path);
                let in_box =
                    pt.x >= min_x && pt.x <= max_x && pt.y >= min_y && pt.y <= max_y;
                in_polygon || in_box || near_path(pt, &self.path, near_radius)
            })
            .map(|note| note.id)
            .collect()
    }
}

/// Even-odd ray-casting containment test, treating `polygon` as closed.
fn point_in_polygon(pt: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > pt.y) != (pj.y > pt.y)
            && pt.x < (pj.x - pi.x) * (pt.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether `pt` lies within `radius` of any segment of `path`.
fn near_path(pt: Point, path: &[Point], radius: f64) -> bool {
    path.windows(2)
        .any(|seg| distance_to_segment(pt, seg[0], seg[1]) <= radius)
}

/// Distance from `pt` to the segment `a`–`b` via clamped projection.
/// Degenerate (zero-length) segments report infinity so they never match.
fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;
    if len_sq == 0.0 {
        return f64::INFINITY;
    }
    let t = (((pt.x - a.x) * cx + (pt.y - a.y) * cy) / len_sq).clamp(0.0, 1.0);
    let px = a.x + t * cx;
    let py = a.y + t * cy;
    (pt.x - px).hypot(pt.y - py)
}
