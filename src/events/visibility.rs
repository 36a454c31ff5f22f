//! Visibility update message.
//!
//! Finalize writes one [`PositionChanged`] per object whose position observers
//! must hear about: the finalized owner itself, its attached sub-objects and
//! every sticky rider it moved. A broadcast layer reads these once per tick
//! and decides which clients receive which movement packet.
//!
//! # Related
//!
//! - [`crate::systems::finalize`] – the writer
//! - [`crate::systems::visibility::collect_visible_objects`] – collects them per tick

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// The object `entity` is at a new position.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    pub entity: Entity,
}
