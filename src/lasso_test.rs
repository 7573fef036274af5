#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::Note;

fn make_note(x: f64, y: f64) -> Note {
    Note {
        id: Uuid::new_v4(),
        title: String::new(),
        content: String::new(),
        color: "green".to_string(),
        x,
        y,
        rotation: 0.0,
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn sweep(points: &[(f64, f64)]) -> LassoSession {
    let mut session = LassoSession::begin(pt(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        session.push(pt(x, y));
    }
    session
}

fn board_with(positions: &[(f64, f64)]) -> (NoteStore, Vec<NoteId>) {
    let mut doc = NoteStore::new();
    let mut ids = Vec::new();
    for &(x, y) in positions {
        let note = make_note(x, y);
        ids.push(note.id);
        doc.insert(note);
    }
    (doc, ids)
}

// --- Session path ---

#[test]
fn begin_starts_path_with_first_point() {
    let session = LassoSession::begin(pt(3.0, 4.0));
    assert_eq!(session.path(), &[pt(3.0, 4.0)]);
}

#[test]
fn push_appends_in_order() {
    let session = sweep(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_eq!(session.path().len(), 3);
    assert_eq!(session.path()[2], pt(2.0, 0.0));
}

// --- Membership: square sweep ---

#[test]
fn closed_square_selects_inside_and_excludes_far_outside() {
    let (doc, ids) = board_with(&[(50.0, 50.0), (200.0, 200.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
    let selected = session.select(&doc, &Camera::default());
    assert!(selected.contains(&ids[0]));
    assert!(!selected.contains(&ids[1]));
}

#[test]
fn polygon_containment_handles_concave_paths() {
    // A "U" shape: (150, 40) sits in the notch, outside the polygon, but
    // within the padded bounding box — the union still selects it. A point
    // well above the sweep stays out.
    let (doc, ids) = board_with(&[(150.0, 40.0), (150.0, -300.0)]);
    let session = sweep(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (100.0, 100.0),
        (200.0, 100.0),
        (200.0, 0.0),
        (300.0, 0.0),
        (300.0, 200.0),
        (0.0, 200.0),
    ]);
    let selected = session.select(&doc, &Camera::default());
    assert!(selected.contains(&ids[0]));
    assert!(!selected.contains(&ids[1]));
}

// --- Membership: open strokes ---

#[test]
fn two_point_path_selects_by_proximity_alone() {
    // (50, 50) is 50 world units from the segment: outside the padded box
    // (reaches y=20) but within the 60-unit path radius.
    let (doc, ids) = board_with(&[(50.0, 50.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0)]);
    let selected = session.select(&doc, &Camera::default());
    assert!(selected.contains(&ids[0]));
}

#[test]
fn two_point_path_excludes_beyond_radius() {
    let (doc, ids) = board_with(&[(50.0, 90.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0)]);
    let selected = session.select(&doc, &Camera::default());
    assert!(!selected.contains(&ids[0]));
}

#[test]
fn padded_box_catches_notes_just_outside_the_stroke() {
    let (doc, ids) = board_with(&[(110.0, 10.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0), (100.0, 20.0)]);
    let selected = session.select(&doc, &Camera::default());
    assert!(selected.contains(&ids[0]));
}

#[test]
fn single_point_path_selects_nothing() {
    let (doc, _) = board_with(&[(0.0, 0.0)]);
    let session = LassoSession::begin(pt(0.0, 0.0));
    assert!(session.select(&doc, &Camera::default()).is_empty());
}

// --- Zoom scaling ---

#[test]
fn thresholds_shrink_in_world_units_as_zoom_grows() {
    // At zoom 2 the path radius is 30 world units; a note 50 units away
    // that zoom 1 would have caught is excluded.
    let (doc, ids) = board_with(&[(50.0, 50.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0)]);
    let mut cam = Camera::new();
    cam.set_zoom(2.0);
    let selected = session.select(&doc, &cam);
    assert!(!selected.contains(&ids[0]));
}

#[test]
fn thresholds_grow_in_world_units_when_zoomed_out() {
    // At zoom 0.5 the path radius is 120 world units.
    let (doc, ids) = board_with(&[(50.0, 100.0)]);
    let session = sweep(&[(0.0, 0.0), (100.0, 0.0)]);
    let mut cam = Camera::new();
    cam.set_zoom(0.5);
    let selected = session.select(&doc, &cam);
    assert!(selected.contains(&ids[0]));
}

// --- Geometry primitives ---

#[test]
fn point_in_polygon_square() {
    let square = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    assert!(point_in_polygon(pt(5.0, 5.0), &square));
    assert!(!point_in_polygon(pt(15.0, 5.0), &square));
    assert!(!point_in_polygon(pt(5.0, -1.0), &square));
}

#[test]
fn point_in_polygon_needs_three_points() {
    assert!(!point_in_polygon(pt(0.0, 0.0), &[pt(-1.0, -1.0), pt(1.0, 1.0)]));
}

#[test]
fn distance_to_segment_projects_onto_interior() {
    let d = distance_to_segment(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert_eq!(d, 3.0);
}

#[test]
fn distance_to_segment_clamps_to_endpoints() {
    let d = distance_to_segment(pt(-3.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert_eq!(d, 5.0);
}

#[test]
fn distance_to_zero_length_segment_never_matches() {
    let d = distance_to_segment(pt(1.0, 1.0), pt(0.0, 0.0), pt(0.0, 0.0));
    assert_eq!(d, f64::INFINITY);
}

#[test]
fn near_path_skips_degenerate_segments() {
    // Repeated points from a stalled pointer must not break proximity.
    let path = [pt(0.0, 0.0), pt(0.0, 0.0), pt(100.0, 0.0)];
    assert!(near_path(pt(50.0, 10.0), &path, 60.0));
}
