//! Simulated object data owned by a transform node.
//!
//! An entity that has both a [`Transform`](super::transform::Transform) and a
//! [`GameObject`] is a node with an owner. Nodes without a `GameObject` are
//! pure spatial helpers: they still resolve and propagate, but never produce
//! visibility updates and are skipped when relation changes are reported.

use std::fmt;

use bevy_ecs::prelude::{Component, Entity};

/// Broad category of a simulated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Player-controlled character. Receives relation-change notices.
    Character,
    Npc,
    /// Controllable object such as a vehicle or ship.
    Slave,
    Doodad,
    Other,
}

impl ObjectKind {
    pub fn is_character(&self) -> bool {
        matches!(self, ObjectKind::Character)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Character => "Character",
            ObjectKind::Npc => "Npc",
            ObjectKind::Slave => "Slave",
            ObjectKind::Doodad => "Doodad",
            ObjectKind::Other => "Object",
        }
    }
}

/// Owner data attached to a transform node.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    pub obj_id: u32,
    pub name: String,
    pub kind: ObjectKind,
}

impl GameObject {
    pub fn new(obj_id: u32, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            obj_id,
            name: name.into(),
            kind,
        }
    }

    pub fn character(obj_id: u32, name: impl Into<String>) -> Self {
        Self::new(obj_id, name, ObjectKind::Character)
    }

    pub fn is_character(&self) -> bool {
        self.kind.is_character()
    }

    /// Name to show in logs and notices. Falls back to the kind for unnamed objects.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.kind.name()
        } else {
            &self.name
        }
    }
}

impl fmt::Display for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.obj_id)
    }
}

/// Marker: never emit visibility updates for this object's own position.
///
/// Attached objects and sticky riders are still notified.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SkipPositionUpdates;

/// Objects that move with their holder and must be re-broadcast whenever the
/// holder's position is finalized.
#[derive(Component, Clone, Debug, Default)]
pub struct AttachedObjects {
    pub doodads: Vec<Entity>,
    pub slaves: Vec<Entity>,
}

impl AttachedObjects {
    pub fn with_doodad(mut self, doodad: Entity) -> Self {
        self.doodads.push(doodad);
        self
    }

    pub fn with_slave(mut self, slave: Entity) -> Self {
        self.slaves.push(slave);
        self
    }

    /// Doodads first, then slaves.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.doodads.iter().chain(self.slaves.iter()).copied()
    }
}
