//! Transformkit library.
//!
//! Spatial transforms for a multi-entity simulation on top of `bevy_ecs`:
//! per-object position and rotation, a parent/child hierarchy, sticky
//! riding links, and a per-tick finalize step that reports moved objects to
//! the visibility layer.
//!
//! This module exposes the components, events, resources and systems for use
//! in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
