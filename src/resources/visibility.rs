//! Per-tick set of objects whose position changed.
//!
//! [`VisibleObjects`] collects the targets of every
//! [`PositionChanged`] message read during a tick, in first-seen order and
//! without duplicates. A broadcast layer drains it once per tick.
//!
//! Call [`register_transform_messages`] once at startup to insert the message
//! queues finalize and the notice observer write to.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::events::notice::ChatNotice;
use crate::events::visibility::PositionChanged;

/// Objects that moved this tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct VisibleObjects {
    order: Vec<Entity>,
    seen: FxHashSet<Entity>,
}

impl VisibleObjects {
    /// Record `entity`. Returns `false` when it was already recorded this tick.
    pub fn push(&mut self, entity: Entity) -> bool {
        if !self.seen.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.seen.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Hand out the collected objects and start a new tick.
    pub fn drain(&mut self) -> Vec<Entity> {
        self.seen.clear();
        std::mem::take(&mut self.order)
    }
}

/// Insert the message queues and the [`VisibleObjects`] collector.
///
/// Existing resources are kept so calling this twice is harmless.
pub fn register_transform_messages(world: &mut World) {
    world.init_resource::<Messages<PositionChanged>>();
    world.init_resource::<Messages<ChatNotice>>();
    world.init_resource::<VisibleObjects>();
}
