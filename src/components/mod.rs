//! ECS components for transform nodes.
//!
//! This module groups the component types attached to positioned entities:
//! the local transform itself, the sticky relation, owner data consulted by
//! finalize, and the persisted spawn record.
//!
//! Submodules overview:
//! - [`gameobject`] – owner data, position-update suppression and attached sub-objects
//! - [`pendingfinalize`] – marker requesting a finalize on the next pass
//! - [`posrot`] – position plus roll/pitch/yaw value type
//! - [`sticky`] – sticky parent/children relation components
//! - [`transform`] – local transform and world/instance/zone keys
//! - [`worldspawnposition`] – serializable spawn location record

pub mod gameobject;
pub mod pendingfinalize;
pub mod posrot;
pub mod sticky;
pub mod transform;
pub mod worldspawnposition;
