//! Per-tick commit of transform movement.
//!
//! Finalizing a node:
//! 1. diffs its resolved world position against the one recorded by the
//!    previous finalize
//! 2. moves every sticky rider by that delta and reports the rider as moved
//! 3. records the new world position
//! 4. reports the owner and its attached objects as moved
//! 5. recurses into the node's children
//!
//! Steps 4 and 5 only happen for nodes with a [`GameObject`]; an ownerless
//! node stops after recording its position.
//!
//! A node's own work always completes before any of its children are visited,
//! so observers see an outer-to-inner order within one subtree. The first
//! finalize of a node only records a baseline and pushes no delta. The
//! baseline deliberately does not start at the origin: that would shift
//! every rider by the host's full world position on the host's first call.
//!
//! Moves are reported as [`PositionChanged`] messages. If the message queue
//! was never registered (see
//! [`register_transform_messages`](crate::resources::visibility::register_transform_messages)),
//! finalize warns once per call and carries on.
//!
//! # Schedule position
//!
//! [`finalize_pending_transforms`] should run **after** every system that moves
//! transforms and **before** [`collect_visible_objects`](crate::systems::visibility::collect_visible_objects).

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{trace, warn};
use rustc_hash::FxHashSet;

use crate::components::gameobject::{AttachedObjects, GameObject, SkipPositionUpdates};
use crate::components::pendingfinalize::PendingFinalize;
use crate::components::sticky::StickyChildren;
use crate::components::transform::Transform;
use crate::events::visibility::PositionChanged;
use crate::systems::resolve::{depth_of, resolve_world};

/// State shared by every node finalized in one pass.
#[derive(Default)]
struct FinalizePass {
    visited: FxHashSet<Entity>,
    warned_missing_messages: bool,
}

impl FinalizePass {
    fn notify(&mut self, world: &mut World, entity: Entity) {
        match world.get_resource_mut::<Messages<PositionChanged>>() {
            Some(mut messages) => {
                messages.write(PositionChanged { entity });
            }
            None => {
                if !self.warned_missing_messages {
                    warn!("Messages<PositionChanged> not registered, position updates are dropped");
                    self.warned_missing_messages = true;
                }
            }
        }
    }

    fn finalize(&mut self, world: &mut World, entity: Entity, include_children: bool) {
        let Some(world_position) = resolve_world(world, entity).map(|p| p.position()) else {
            return;
        };
        if !self.visited.insert(entity) {
            return;
        }

        let delta = world
            .get::<Transform>(entity)
            .and_then(Transform::last_finalized_world_position)
            .map(|last| world_position - last)
            .unwrap_or(Vec3::ZERO);
        if delta != Vec3::ZERO {
            trace!("Finalize {:?}: delta {:?}", entity, delta);
        }

        let riders = world
            .get::<StickyChildren>(entity)
            .map(StickyChildren::to_vec)
            .unwrap_or_default();
        for rider in riders {
            if let Some(mut transform) = world.get_mut::<Transform>(rider) {
                transform.local.translate(delta);
            }
            self.notify(world, rider);
        }

        // Riders cannot move this node, but resolve again rather than reuse.
        if let Some(position) = resolve_world(world, entity).map(|p| p.position())
            && let Some(mut transform) = world.get_mut::<Transform>(entity)
        {
            transform.set_last_finalized_world_position(position);
        }

        if world.get::<GameObject>(entity).is_none() {
            return;
        }
        if world.get::<SkipPositionUpdates>(entity).is_none() {
            self.notify(world, entity);
        }

        let attached: Vec<Entity> = world
            .get::<AttachedObjects>(entity)
            .map(|attached| attached.iter().collect())
            .unwrap_or_default();
        for object in attached {
            self.notify(world, object);
        }

        if include_children {
            let children: Vec<Entity> = world
                .get::<Children>(entity)
                .map(|children| children.to_vec())
                .unwrap_or_default();
            for child in children {
                self.finalize(world, child, true);
            }
        }
    }
}

/// Finalize `entity` and, when `include_children` is set, its whole subtree.
///
/// Entities without a [`Transform`] are ignored. Calling this twice with no
/// movement in between produces a zero delta the second time.
pub fn finalize_transform(world: &mut World, entity: Entity, include_children: bool) {
    FinalizePass::default().finalize(world, entity, include_children);
}

/// Mark `entity` for the next [`finalize_pending_transforms`] pass.
pub fn request_finalize(world: &mut World, entity: Entity) {
    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
        entity_mut.insert(PendingFinalize);
    }
}

/// Exclusive system: finalize every node marked with [`PendingFinalize`].
///
/// Markers are processed shallowest first, so a marked ancestor covers its
/// marked descendants and no node is finalized twice in one pass. All
/// markers are removed afterwards.
pub fn finalize_pending_transforms(world: &mut World) {
    let mut pending: Vec<Entity> = world
        .query_filtered::<Entity, With<PendingFinalize>>()
        .iter(world)
        .collect();
    if pending.is_empty() {
        return;
    }
    pending.sort_by_cached_key(|entity| depth_of(world, *entity));

    let mut pass = FinalizePass::default();
    for entity in &pending {
        pass.finalize(world, *entity, true);
    }
    for entity in pending {
        if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.remove::<PendingFinalize>();
        }
    }
}
