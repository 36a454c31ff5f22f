//! Position and orientation value type.
//!
//! [`PositionAndRotation`] is the plain data carried by every
//! [`Transform`](crate::components::transform::Transform): a 3D position, a
//! roll/pitch/yaw rotation, and a flag telling whether the value is expressed
//! relative to a parent (`local`) or has been resolved into world space.
//!
//! Rotation is stored as Euler angles in the `x` (roll), `y` (pitch) and `z`
//! (yaw) lanes of a [`Vec3`]. [`PositionAndRotation::rotate`] adds angles
//! component-wise; no matrix composition takes place.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Position plus roll/pitch/yaw rotation.
///
/// Values start out local. Only the hierarchy resolver
/// ([`resolve_world`](crate::systems::resolve::resolve_world)) marks a value
/// as resolved, when it hands back a finished world-space result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionAndRotation {
    position: Vec3,
    rotation: Vec3,
    is_local: bool,
}

impl Default for PositionAndRotation {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            is_local: true,
        }
    }
}

impl PositionAndRotation {
    /// Create a local value from a position and a roll/pitch/yaw rotation.
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            is_local: true,
        }
    }

    /// Create a local value at `position` with no rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn roll(&self) -> f32 {
        self.rotation.x
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.y
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.z
    }

    /// `true` while the value is relative to a parent (or not yet resolved).
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.rotation.z = yaw;
    }

    /// Move the position by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add `angles` (roll, pitch, yaw) to the rotation.
    pub fn rotate(&mut self, angles: Vec3) {
        self.rotation += angles;
    }

    /// Flag the value as a finished world-space result.
    pub(crate) fn mark_resolved(&mut self) {
        self.is_local = false;
    }
}

impl fmt::Display for PositionAndRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.1} Y:{:.1} Z:{:.1} Roll:{:.1} Pitch:{:.1} Yaw:{:.1}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z
        )
    }
}
