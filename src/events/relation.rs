//! Relation change events and the notice observer.
//!
//! [`set_parent`](crate::systems::hierarchy::set_parent) and
//! [`set_sticky_parent`](crate::systems::hierarchy::set_sticky_parent)
//! trigger a [`RelationChangedEvent`] when a player-like object changes
//! parent or sticky host. The hierarchy code never formats text;
//! [`relation_notice_observer`] turns the event into a [`ChatNotice`] for the
//! affected player.
//!
//! # Example
//!
//! ```ignore
//! register_transform_messages(&mut world);
//! world.add_observer(relation_notice_observer);
//! ```
//!
//! # Related
//!
//! - [`crate::events::notice::ChatNotice`] – the message written by the observer
//! - [`crate::resources::transformconfig::TransformConfig`] – `relation_notices` toggle

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::gameobject::GameObject;
use crate::events::notice::ChatNotice;
use crate::resources::transformconfig::TransformConfig;

/// Which of the two relations changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Parent,
    Sticky,
}

/// Event triggered after a player-like object's parent or sticky host changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationChangedEvent {
    /// The object whose relation changed.
    pub entity: Entity,
    pub kind: RelationKind,
    /// Previous parent or host.
    pub old: Option<Entity>,
    /// New parent or host.
    pub new: Option<Entity>,
}

/// Label an object the way relation notices show it: `Name (obj_id)`, or
/// `<null>` when there is no related object or it has no owner data.
pub fn relation_label(objects: &Query<&GameObject>, entity: Option<Entity>) -> String {
    entity
        .and_then(|e| objects.get(e).ok())
        .map(|obj| obj.to_string())
        .unwrap_or_else(|| "<null>".to_string())
}

/// Observer that writes a chat notice for each relation change.
///
/// Does nothing when notices are disabled in [`TransformConfig`] or when the
/// `Messages<ChatNotice>` resource was never registered.
pub fn relation_notice_observer(
    trigger: On<RelationChangedEvent>,
    objects: Query<&GameObject>,
    config: Option<Res<TransformConfig>>,
    notices: Option<ResMut<Messages<ChatNotice>>>,
) {
    let event = trigger.event();
    if config.is_some_and(|c| !c.relation_notices) {
        return;
    }
    let Some(mut notices) = notices else {
        debug!("No ChatNotice messages registered, dropping relation notice");
        return;
    };

    let old = relation_label(&objects, event.old);
    let new = relation_label(&objects, event.new);
    let text = match event.kind {
        RelationKind::Parent => format!("|cFF88FF88Changing parent - {} => {}|r", old, new),
        RelationKind::Sticky => format!("|cFFFF88FFChanging Sticky - {} => {}|r", old, new),
    };
    notices.write(ChatNotice {
        recipient: event.entity,
        text,
    });
}
