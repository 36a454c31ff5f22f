//! Components for the sticky (riding) relation.
//!
//! A sticky child rides on a host without being re-parented: its local
//! coordinates stay absolute, and each time the host is finalized the host's
//! world-position delta is added to the child's position. This is what keeps a
//! character standing on a moving ship while it still walks freely.
//!
//! Both sides are stored:
//! - [`StickyParent`] on the rider points to its host
//! - [`StickyChildren`] on the host lists every rider
//!
//! The two sides are maintained together by
//! [`attach_sticky_transform`](crate::systems::hierarchy::attach_sticky_transform) and
//! [`detach_sticky_transform`](crate::systems::hierarchy::detach_sticky_transform).
//! Insert or remove them directly and the relation goes out of sync.
//!
//! # Related
//!
//! - [`crate::systems::finalize`] – applies host deltas to riders

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

/// Host that this entity is riding on.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickyParent(pub Entity);

impl StickyParent {
    pub fn get(&self) -> Entity {
        self.0
    }
}

/// Riders currently attached to this host, in attach order.
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct StickyChildren(SmallVec<[Entity; 4]>);

impl StickyChildren {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Entity> {
        self.0.to_vec()
    }

    /// Append a rider. Returns `false` when it was already listed.
    pub(crate) fn add(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.0.push(entity);
        true
    }

    /// Remove a rider. Returns `false` when it was not listed.
    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        match self.0.iter().position(|e| *e == entity) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_add_rejects_duplicates_and_keeps_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut riders = StickyChildren::default();
        assert!(riders.add(a));
        assert!(riders.add(b));
        assert!(!riders.add(a));
        assert_eq!(riders.to_vec(), vec![a, b]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut riders = StickyChildren::default();
        riders.add(a);
        assert!(!riders.remove(b));
        assert!(riders.remove(a));
        assert!(riders.is_empty());
    }
}
