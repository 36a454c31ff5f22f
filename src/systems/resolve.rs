//! World-space resolution of transform nodes.
//!
//! Nothing is cached: every call walks the parent chain from the node up to
//! its root and folds the local values back down. Position composes by plain
//! addition through the chain. Rotation also composes by addition of the
//! roll/pitch/yaw lanes; a parent's orientation is not applied to its child's
//! offset.
//!
//! A parent that has no [`Transform`] ends the walk, as if the node were a
//! root.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;

use crate::components::posrot::PositionAndRotation;
use crate::components::transform::Transform;

/// Parent of `entity` in the transform hierarchy, if it has one with a [`Transform`].
pub fn transform_parent(world: &World, entity: Entity) -> Option<Entity> {
    world
        .get::<ChildOf>(entity)
        .map(ChildOf::parent)
        .filter(|parent| world.get::<Transform>(*parent).is_some())
}

/// Resolve the world position/rotation of `entity`.
///
/// Returns `None` when the entity has no [`Transform`]. A root node resolves
/// to its local value unchanged; any deeper node resolves to a value with
/// [`is_local`](PositionAndRotation::is_local) cleared.
pub fn resolve_world(world: &World, entity: Entity) -> Option<PositionAndRotation> {
    let local = world.get::<Transform>(entity)?.local;
    let Some(parent) = transform_parent(world, entity) else {
        return Some(local);
    };

    let mut resolved = resolve_world(world, parent)?;
    resolved.translate(local.position());
    resolved.rotate(local.rotation());
    resolved.mark_resolved();
    Some(resolved)
}

/// Number of transform ancestors above `entity`. Roots have depth 0.
pub fn depth_of(world: &World, entity: Entity) -> usize {
    let mut depth = 0;
    let mut current = entity;
    while let Some(parent) = transform_parent(world, current) {
        depth += 1;
        current = parent;
    }
    depth
}

/// Topmost transform ancestor of `entity`, or `entity` itself for a root.
pub fn root_of(world: &World, entity: Entity) -> Entity {
    let mut current = entity;
    while let Some(parent) = transform_parent(world, current) {
        current = parent;
    }
    current
}

/// `true` when `ancestor` appears on the parent chain above `entity`.
///
/// An entity is not its own ancestor.
pub fn is_ancestor_of(world: &World, ancestor: Entity, entity: Entity) -> bool {
    let mut current = entity;
    while let Some(parent) = transform_parent(world, current) {
        if parent == ancestor {
            return true;
        }
        current = parent;
    }
    false
}
