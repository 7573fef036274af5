//! Interaction engine for a shared sticky-note corkboard.
//!
//! This crate owns everything between raw pointer events and the remote
//! board store: camera pan/zoom and coordinate conversion, the gesture
//! state machine (single drag, group drag, freehand lasso, pan), lasso
//! hit-testing, and the sync guard that debounces outbound writes while
//! shielding an in-progress gesture from remote echoes. The host layer is
//! responsible only for wiring input events to the engine, rendering the
//! resulting state, and delivering store change notifications back in via
//! [`engine::Engine::on_remote`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, gesture dispatch, and [`engine::Action`] |
//! | [`doc`] | In-memory note store and note types |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`drag`] | Single-note drag session |
//! | [`group_drag`] | Uniform multi-note drag session |
//! | [`lasso`] | Freehand lasso path and selection membership |
//! | [`hit`] | Hit-testing notes under a world point |
//! | [`sync`] | Store boundary, write debouncing, and the remote-echo guard |
//! | [`consts`] | Shared numeric constants (zoom limits, thresholds, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod group_drag;
pub mod hit;
pub mod input;
pub mod lasso;
pub mod sync;
