//! Conversions between live transforms and spawn records, plus clone helpers.
//!
//! # Related
//!
//! - [`crate::components::worldspawnposition::WorldSpawnPosition`] – the record
//! - [`crate::systems::hierarchy`] – relation edits used when applying a record

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;

use crate::components::posrot::PositionAndRotation;
use crate::components::transform::Transform;
use crate::components::worldspawnposition::WorldSpawnPosition;
use crate::systems::hierarchy::{
    detach_all, detach_sticky_transform, sticky_children_of, sticky_parent_of,
};
use crate::systems::resolve::{is_ancestor_of, resolve_world, transform_parent};

/// Move `entity` to the absolute location in `spawn`.
///
/// The node is detached from its parent, its children, its sticky host and
/// its riders first, so afterwards its local value is its world value. The
/// instance id is only replaced when `new_instance_id` is non-zero.
pub fn apply_world_spawn_position(
    world: &mut World,
    entity: Entity,
    spawn: &WorldSpawnPosition,
    new_instance_id: u32,
) {
    if world.get::<Transform>(entity).is_none() {
        return;
    }

    detach_all(world, entity);
    if let Some(host) = sticky_parent_of(world, entity) {
        detach_sticky_transform(world, host, entity);
    }
    for rider in sticky_children_of(world, entity) {
        detach_sticky_transform(world, entity, rider);
    }

    if let Some(mut transform) = world.get_mut::<Transform>(entity) {
        transform.world_id = spawn.world_id;
        transform.zone_id = spawn.zone_id;
        if new_instance_id != 0 {
            transform.instance_id = new_instance_id;
        }
        transform.local.set_position(spawn.position());
        transform.local.set_rotation(spawn.rotation());
    }
}

/// Snapshot the resolved world location of `entity` as a spawn record.
pub fn clone_as_spawn_position(world: &World, entity: Entity) -> Option<WorldSpawnPosition> {
    let transform = world.get::<Transform>(entity)?;
    let resolved = resolve_world(world, entity)?;
    Some(WorldSpawnPosition {
        world_id: transform.world_id,
        zone_id: transform.zone_id,
        x: resolved.x(),
        y: resolved.y(),
        z: resolved.z(),
        roll: resolved.roll(),
        pitch: resolved.pitch(),
        yaw: resolved.yaw(),
    })
}

/// Put `transform` on `target` under `parent`, replacing any previous one.
///
/// The local value is installed as given; no frame conversion happens.
fn install_transform(
    world: &mut World,
    target: Entity,
    transform: Transform,
    parent: Option<Entity>,
) -> bool {
    if let Some(parent) = parent
        && (parent == target || is_ancestor_of(world, target, parent))
    {
        return false;
    }
    let Ok(mut target_mut) = world.get_entity_mut(target) else {
        return false;
    };
    target_mut.insert(transform);
    match parent {
        Some(parent) => {
            target_mut.insert(ChildOf(parent));
        }
        None => {
            target_mut.remove::<ChildOf>();
        }
    }
    world.flush();
    true
}

fn same_frame_copy(world: &World, source: Entity) -> Option<(Transform, Option<Entity>)> {
    let transform = world.get::<Transform>(source)?;
    Some((
        transform.fresh_copy(transform.local),
        transform_parent(world, source),
    ))
}

fn world_frame_copy(world: &World, source: Entity) -> Option<Transform> {
    let transform = world.get::<Transform>(source)?;
    let resolved = resolve_world(world, source)?;
    Some(transform.fresh_copy(PositionAndRotation::new(
        resolved.position(),
        resolved.rotation(),
    )))
}

/// Spawn a standalone copy of `source` under the same parent with the same local value.
pub fn clone_transform(world: &mut World, source: Entity) -> Option<Entity> {
    let (copy, parent) = same_frame_copy(world, source)?;
    let target = world.spawn_empty().id();
    install_transform(world, target, copy, parent).then_some(target)
}

/// Give `owner` a copy of `source` under the same parent with the same local value.
pub fn clone_transform_onto(world: &mut World, source: Entity, owner: Entity) -> bool {
    match same_frame_copy(world, source) {
        Some((copy, parent)) => install_transform(world, owner, copy, parent),
        None => false,
    }
}

/// Spawn a parentless copy of `source` placed at its resolved world location.
pub fn clone_detached(world: &mut World, source: Entity) -> Option<Entity> {
    let copy = world_frame_copy(world, source)?;
    let target = world.spawn_empty().id();
    install_transform(world, target, copy, None).then_some(target)
}

/// Give `owner` a parentless copy of `source` placed at its resolved world location.
pub fn clone_detached_onto(world: &mut World, source: Entity, owner: Entity) -> bool {
    match world_frame_copy(world, source) {
        Some(copy) => install_transform(world, owner, copy, None),
        None => false,
    }
}

/// Give `child` a transform parented to `source` with a zero local value.
pub fn clone_attached_onto(world: &mut World, source: Entity, child: Entity) -> bool {
    let Some(transform) = world.get::<Transform>(source) else {
        return false;
    };
    let copy = transform.fresh_copy(PositionAndRotation::default());
    install_transform(world, child, copy, Some(source))
}
