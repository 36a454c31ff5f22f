//! Hierarchical transform node component.
//!
//! Every positioned entity carries a [`Transform`]. It stores the entity's
//! local position/rotation, relative to its parent when the entity has a
//! [`ChildOf`](bevy_ecs::hierarchy::ChildOf), or to the world origin when it
//! does not, plus the world/instance/zone keys that pick the simulated
//! replica the node lives in.
//!
//! The relations themselves are not stored here:
//! - parent/children use Bevy's [`ChildOf`](bevy_ecs::hierarchy::ChildOf) and
//!   [`Children`](bevy_ecs::hierarchy::Children)
//! - sticky links use [`StickyParent`](super::sticky::StickyParent) and
//!   [`StickyChildren`](super::sticky::StickyChildren)
//!
//! Mutate relations only through [`crate::systems::hierarchy`] so that local
//! coordinates are converted between frames and both sides stay consistent.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use super::posrot::PositionAndRotation;

/// World id assigned to transforms that do not name one.
pub const DEFAULT_WORLD_ID: u32 = 0;
/// Instance id assigned to transforms that do not name one.
pub const DEFAULT_INSTANCE_ID: u32 = 1;

/// Local position/rotation plus location keys of a simulated object.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Simulated world this node belongs to.
    pub world_id: u32,
    /// Replica of the world (dungeon instances and the like).
    pub instance_id: u32,
    /// Zone key inside the world.
    pub zone_id: u32,
    /// Position/rotation relative to the parent, or absolute when parentless.
    pub local: PositionAndRotation,
    last_finalized_world_position: Option<Vec3>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Transform at the origin in the default world and instance.
    pub fn new() -> Self {
        Self {
            world_id: DEFAULT_WORLD_ID,
            instance_id: DEFAULT_INSTANCE_ID,
            zone_id: 0,
            local: PositionAndRotation::default(),
            last_finalized_world_position: None,
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::from_position(Vec3::new(x, y, z))
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::from_posrot(PositionAndRotation::from_position(position))
    }

    pub fn from_position_rotation(position: Vec3, rotation: Vec3) -> Self {
        Self::from_posrot(PositionAndRotation::new(position, rotation))
    }

    pub fn from_xyz_rpy(x: f32, y: f32, z: f32, roll: f32, pitch: f32, yaw: f32) -> Self {
        Self::from_position_rotation(Vec3::new(x, y, z), Vec3::new(roll, pitch, yaw))
    }

    pub fn from_posrot(local: PositionAndRotation) -> Self {
        Self {
            local,
            ..Self::new()
        }
    }

    /// Set world, zone and instance keys.
    pub fn with_location(mut self, world_id: u32, zone_id: u32, instance_id: u32) -> Self {
        self.world_id = world_id;
        self.zone_id = zone_id;
        self.instance_id = instance_id;
        self
    }

    /// Set only the yaw of the local rotation, leaving roll and pitch at their value.
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.local.set_yaw(yaw);
        self
    }

    /// `true` when both nodes live in the same world and instance replica.
    pub fn shares_replica_with(&self, other: &Transform) -> bool {
        self.world_id == other.world_id && self.instance_id == other.instance_id
    }

    /// World position recorded by the last finalize, if the node was ever finalized.
    pub fn last_finalized_world_position(&self) -> Option<Vec3> {
        self.last_finalized_world_position
    }

    pub(crate) fn set_last_finalized_world_position(&mut self, position: Vec3) {
        self.last_finalized_world_position = Some(position);
    }

    /// Copy of the location keys and local value, without finalize history.
    pub(crate) fn fresh_copy(&self, local: PositionAndRotation) -> Self {
        Self {
            world_id: self.world_id,
            instance_id: self.instance_id,
            zone_id: self.zone_id,
            local,
            last_finalized_world_position: None,
        }
    }
}
