//! Parent and sticky relation management.
//!
//! Every relation edit goes through this module so that both sides of a link
//! are updated in the same call:
//! - the parent relation uses Bevy's [`ChildOf`]/[`Children`]; re-parenting
//!   converts the node's local position between frames
//! - the sticky relation uses [`StickyParent`]/[`StickyChildren`] and never
//!   touches coordinates
//!
//! # Usage
//!
//! ```ignore
//! // Direct mutation (requires &mut World)
//! set_parent(&mut world, rider, Some(ship))?;
//! attach_sticky_transform(&mut world, ship, walker);
//! despawn_transform(&mut world, ship);
//!
//! // Deferred via commands (from within systems)
//! commands.cmd_set_parent(rider, Some(ship));
//! commands.cmd_set_sticky_parent(walker, None);
//! ```
//!
//! # Related
//!
//! - [`crate::events::relation`] – events triggered for player-like objects
//! - [`crate::systems::resolve`] – parent chain walks

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use log::{debug, warn};
use thiserror::Error;

use crate::components::gameobject::GameObject;
use crate::components::sticky::{StickyChildren, StickyParent};
use crate::components::transform::Transform;
use crate::events::relation::{RelationChangedEvent, RelationKind};
use crate::systems::finalize::finalize_transform;
use crate::systems::resolve::is_ancestor_of;

/// Rejected parent change. No mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("cannot parent {entity} to {parent}: would create a cycle")]
    Cycle { entity: Entity, parent: Entity },
    #[error("{0} has no Transform")]
    MissingTransform(Entity),
}

fn has_transform(world: &World, entity: Entity) -> bool {
    world.get::<Transform>(entity).is_some()
}

fn is_character(world: &World, entity: Entity) -> bool {
    world
        .get::<GameObject>(entity)
        .is_some_and(GameObject::is_character)
}

/// The entity itself when it carries owner data.
fn owner_of(world: &World, entity: Option<Entity>) -> Option<Entity> {
    entity.filter(|e| world.get::<GameObject>(*e).is_some())
}

fn local_position(world: &World, entity: Entity) -> glam::Vec3 {
    world
        .get::<Transform>(entity)
        .map(|t| t.local.position())
        .unwrap_or(glam::Vec3::ZERO)
}

fn translate_local(world: &mut World, entity: Entity, offset: glam::Vec3) {
    if let Some(mut transform) = world.get_mut::<Transform>(entity) {
        transform.local.translate(offset);
    }
}

/// Current parent of `entity`, whether or not it carries a [`Transform`].
pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(ChildOf::parent)
}

/// Direct children of `entity`, in insertion order.
pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<Children>(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

/// Current sticky host of `entity`.
pub fn sticky_parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<StickyParent>(entity).map(StickyParent::get)
}

/// Riders attached to `host`, in attach order.
pub fn sticky_children_of(world: &World, host: Entity) -> Vec<Entity> {
    world
        .get::<StickyChildren>(host)
        .map(StickyChildren::to_vec)
        .unwrap_or_default()
}

/// Change the parent of `entity`, converting its local position.
///
/// Detaching adds the old parent's local position to the node's local
/// position; attaching subtracts the new parent's. For a node under a root
/// parent this keeps the resolved world position unchanged.
///
/// Setting the current parent again does nothing. An entity without a
/// [`Transform`] is left alone. When the entity is a player-like object and
/// the owners of the old and new parent differ, a [`RelationChangedEvent`] is
/// triggered.
///
/// # Errors
///
/// - [`HierarchyError::Cycle`] if `new_parent` is `entity` or one of its descendants
/// - [`HierarchyError::MissingTransform`] if `new_parent` has no [`Transform`]
pub fn set_parent(
    world: &mut World,
    entity: Entity,
    new_parent: Option<Entity>,
) -> Result<(), HierarchyError> {
    change_parent(world, entity, new_parent, true)
}

fn change_parent(
    world: &mut World,
    entity: Entity,
    new_parent: Option<Entity>,
    notify: bool,
) -> Result<(), HierarchyError> {
    if !has_transform(world, entity) {
        return Ok(());
    }
    let old_parent = parent_of(world, entity);
    if old_parent == new_parent {
        return Ok(());
    }

    if let Some(parent) = new_parent {
        if parent == entity || is_ancestor_of(world, entity, parent) {
            return Err(HierarchyError::Cycle { entity, parent });
        }
        if !has_transform(world, parent) {
            return Err(HierarchyError::MissingTransform(parent));
        }
    }

    if let Some(old) = old_parent {
        world.entity_mut(entity).remove::<ChildOf>();
        let offset = local_position(world, old);
        translate_local(world, entity, offset);
    }

    if let Some(parent) = new_parent {
        world.entity_mut(entity).insert(ChildOf(parent));
        let offset = local_position(world, parent);
        translate_local(world, entity, -offset);
    }
    world.flush();

    debug!(
        "Parent of {:?} changed: {:?} => {:?}",
        entity, old_parent, new_parent
    );

    if notify
        && is_character(world, entity)
        && owner_of(world, old_parent) != owner_of(world, new_parent)
    {
        world.trigger(RelationChangedEvent {
            entity,
            kind: RelationKind::Parent,
            old: old_parent,
            new: new_parent,
        });
    }
    Ok(())
}

/// Detach `entity` from its parent, then detach each of its direct children.
///
/// Grandchildren stay attached to their own parents.
pub fn detach_all(world: &mut World, entity: Entity) {
    if let Err(e) = set_parent(world, entity, None) {
        warn!("detach_all: {}", e);
    }
    for child in children_of(world, entity) {
        if let Err(e) = set_parent(world, child, None) {
            warn!("detach_all: {}", e);
        }
    }
}

/// Start carrying `candidate` as a sticky rider of `host`.
///
/// Returns `false` without changing anything when:
/// - `host` or `candidate` has no [`Transform`]
/// - `candidate` has no [`GameObject`]
/// - `candidate` is `host`
/// - `candidate` already rides `host`
/// - the two nodes are in different worlds or instances
///
/// A rider still attached to another host is released from it first, so a
/// node rides at most one host. Local coordinates are not touched.
pub fn attach_sticky_transform(world: &mut World, host: Entity, candidate: Entity) -> bool {
    let (Some(host_transform), Some(candidate_transform)) = (
        world.get::<Transform>(host),
        world.get::<Transform>(candidate),
    ) else {
        return false;
    };
    if !host_transform.shares_replica_with(candidate_transform) {
        return false;
    }
    if candidate == host || world.get::<GameObject>(candidate).is_none() {
        return false;
    }
    if world
        .get::<StickyChildren>(host)
        .is_some_and(|riders| riders.contains(candidate))
    {
        return false;
    }

    if let Some(previous) = sticky_parent_of(world, candidate) {
        detach_sticky_transform(world, previous, candidate);
    }

    if let Some(mut riders) = world.get_mut::<StickyChildren>(host) {
        riders.add(candidate);
    } else {
        let mut riders = StickyChildren::default();
        riders.add(candidate);
        world.entity_mut(host).insert(riders);
    }
    world.entity_mut(candidate).insert(StickyParent(host));
    true
}

fn remove_sticky_rider(world: &mut World, host: Entity, rider: Entity) {
    let now_empty = match world.get_mut::<StickyChildren>(host) {
        Some(mut riders) => {
            riders.remove(rider);
            riders.is_empty()
        }
        None => return,
    };
    if now_empty {
        world.entity_mut(host).remove::<StickyChildren>();
    }
}

/// Stop carrying `candidate` on `host`.
///
/// The candidate's [`StickyParent`] is always cleared, even when it was not
/// listed on `host`. If it pointed at some other host, that host lets go of it
/// too.
pub fn detach_sticky_transform(world: &mut World, host: Entity, candidate: Entity) {
    remove_sticky_rider(world, host, candidate);

    let previous = world
        .get_entity_mut(candidate)
        .ok()
        .and_then(|mut candidate_mut| candidate_mut.take::<StickyParent>());
    if let Some(StickyParent(previous)) = previous
        && previous != host
    {
        remove_sticky_rider(world, previous, candidate);
    }
}

/// Make `entity` ride `new_host`, or stop riding with `None`.
///
/// Returns `true` when `entity` ends up in the requested state (including
/// when it already was), `false` when the attach was rejected; see
/// [`attach_sticky_transform`]. A rejected attach still releases the old
/// host. A player-like object gets a [`RelationChangedEvent`] whenever its
/// host actually changed.
pub fn set_sticky_parent(world: &mut World, entity: Entity, new_host: Option<Entity>) -> bool {
    if !has_transform(world, entity) {
        return false;
    }
    let old_host = sticky_parent_of(world, entity);
    if let Some(old) = old_host
        && old_host != new_host
    {
        detach_sticky_transform(world, old, entity);
    }

    let attached = match new_host {
        None => true,
        Some(host) if old_host == Some(host) => true,
        Some(host) => attach_sticky_transform(world, host, entity),
    };

    let current = sticky_parent_of(world, entity);
    if current != old_host {
        debug!(
            "Sticky host of {:?} changed: {:?} => {:?}",
            entity, old_host, current
        );
        if is_character(world, entity) {
            world.trigger(RelationChangedEvent {
                entity,
                kind: RelationKind::Sticky,
                old: old_host,
                new: current,
            });
        }
    }
    attached
}

/// Release every relation `entity` takes part in, then despawn it.
///
/// Children become roots and riders are released instead of being despawned
/// along with it. Returns `false` if the entity did not exist.
pub fn despawn_transform(world: &mut World, entity: Entity) -> bool {
    if world.get_entity(entity).is_err() {
        return false;
    }

    if let Err(e) = change_parent(world, entity, None, false) {
        warn!("despawn_transform: {}", e);
    }
    for child in children_of(world, entity) {
        if let Err(e) = set_parent(world, child, None) {
            warn!("despawn_transform: {}", e);
        }
    }
    if let Some(host) = sticky_parent_of(world, entity) {
        detach_sticky_transform(world, host, entity);
    }
    for rider in sticky_children_of(world, entity) {
        detach_sticky_transform(world, entity, rider);
    }

    world.despawn(entity)
}

// ---- Commands extensions ----

/// Extension trait adding deferred transform operations to [`Commands`].
///
/// Import this trait to use `commands.cmd_set_parent()`, etc. Rejections are
/// logged at `warn` level.
pub trait TransformCommands {
    /// Queues a [`set_parent`] command.
    fn cmd_set_parent(&mut self, entity: Entity, parent: Option<Entity>);

    /// Queues a [`set_sticky_parent`] command.
    fn cmd_set_sticky_parent(&mut self, entity: Entity, host: Option<Entity>);

    /// Queues a [`detach_all`] command.
    fn cmd_detach_all(&mut self, entity: Entity);

    /// Queues a [`finalize_transform`] command including children.
    fn cmd_finalize(&mut self, entity: Entity);

    /// Queues a [`despawn_transform`] command.
    fn cmd_despawn_transform(&mut self, entity: Entity);
}

impl TransformCommands for Commands<'_, '_> {
    fn cmd_set_parent(&mut self, entity: Entity, parent: Option<Entity>) {
        self.queue(move |world: &mut World| {
            if let Err(e) = set_parent(world, entity, parent) {
                warn!("cmd_set_parent: {}", e);
            }
        });
    }

    fn cmd_set_sticky_parent(&mut self, entity: Entity, host: Option<Entity>) {
        self.queue(move |world: &mut World| {
            if !set_sticky_parent(world, entity, host) {
                warn!(
                    "cmd_set_sticky_parent: {:?} could not ride {:?}",
                    entity, host
                );
            }
        });
    }

    fn cmd_detach_all(&mut self, entity: Entity) {
        self.queue(move |world: &mut World| {
            detach_all(world, entity);
        });
    }

    fn cmd_finalize(&mut self, entity: Entity) {
        self.queue(move |world: &mut World| {
            finalize_transform(world, entity, true);
        });
    }

    fn cmd_despawn_transform(&mut self, entity: Entity) {
        self.queue(move |world: &mut World| {
            if !despawn_transform(world, entity) {
                warn!("cmd_despawn_transform: {:?} does not exist", entity);
            }
        });
    }
}
