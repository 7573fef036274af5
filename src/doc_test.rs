#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn make_note(x: f64, y: f64) -> Note {
    Note {
        id: Uuid::new_v4(),
        title: "todo".to_string(),
        content: "buy milk".to_string(),
        color: "yellow".to_string(),
        x,
        y,
        rotation: -2.5,
    }
}

// --- Store basics ---

#[test]
fn new_store_is_empty() {
    let store = NoteStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn insert_and_get() {
    let mut store = NoteStore::new();
    let note = make_note(10.0, 20.0);
    let id = note.id;
    store.insert(note);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).map(|n| n.x), Some(10.0));
}

#[test]
fn insert_same_id_overwrites() {
    let mut store = NoteStore::new();
    let mut note = make_note(1.0, 1.0);
    let id = note.id;
    store.insert(note.clone());
    note.x = 99.0;
    store.insert(note);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).map(|n| n.x), Some(99.0));
}

#[test]
fn remove_returns_note() {
    let mut store = NoteStore::new();
    let note = make_note(3.0, 4.0);
    let id = note.id;
    store.insert(note);
    let removed = store.remove(&id);
    assert_eq!(removed.map(|n| n.y), Some(4.0));
    assert!(store.is_empty());
}

#[test]
fn remove_missing_is_none() {
    let mut store = NoteStore::new();
    assert!(store.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn set_position_moves_note() {
    let mut store = NoteStore::new();
    let note = make_note(0.0, 0.0);
    let id = note.id;
    store.insert(note);
    assert!(store.set_position(&id, 42.0, -7.0));
    assert_eq!(store.get(&id).map(|n| (n.x, n.y)), Some((42.0, -7.0)));
}

#[test]
fn set_position_missing_returns_false() {
    let mut store = NoteStore::new();
    assert!(!store.set_position(&Uuid::new_v4(), 1.0, 1.0));
}

// --- Snapshots ---

#[test]
fn load_snapshot_replaces_contents() {
    let mut store = NoteStore::new();
    store.insert(make_note(1.0, 1.0));
    let replacement = vec![make_note(5.0, 5.0), make_note(6.0, 6.0)];
    store.load_snapshot(replacement);
    assert_eq!(store.len(), 2);
}

#[test]
fn snapshot_is_sorted_by_id() {
    let mut store = NoteStore::new();
    for _ in 0..5 {
        store.insert(make_note(0.0, 0.0));
    }
    let snap = store.snapshot();
    for pair in snap.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
}

#[test]
fn snapshot_round_trips_through_load() {
    let mut store = NoteStore::new();
    store.insert(make_note(1.0, 2.0));
    store.insert(make_note(3.0, 4.0));
    let snap = store.snapshot();

    let mut other = NoteStore::new();
    other.load_snapshot(snap.clone());
    assert_eq!(other.snapshot(), snap);
}

// --- Wire shape ---

#[test]
fn note_serializes_with_flat_fields() {
    let note = make_note(10.0, 20.0);
    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["x"], 10.0);
    assert_eq!(value["color"], "yellow");
}

#[test]
fn note_deserializes_from_json() {
    let id = Uuid::new_v4();
    let value = serde_json::json!({
        "id": id,
        "title": "t",
        "content": "c",
        "color": "pink",
        "x": 1.5,
        "y": -2.5,
        "rotation": 4.0,
    });
    let note: Note = serde_json::from_value(value).unwrap();
    assert_eq!(note.id, id);
    assert_eq!(note.color, "pink");
    assert_eq!(note.y, -2.5);
}

#[test]
fn note_missing_field_fails_to_deserialize() {
    let value = serde_json::json!({ "id": Uuid::new_v4(), "title": "t" });
    assert!(serde_json::from_value::<Note>(value).is_err());
}
