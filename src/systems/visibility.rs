//! Visibility message plumbing.
//!
//! Finalize writes [`PositionChanged`] messages; [`collect_visible_objects`]
//! folds them into the [`VisibleObjects`] resource for the broadcast layer.
//!
//! # Schedule position
//!
//! ```ignore
//! update.add_systems(
//!     (
//!         finalize_pending_transforms,
//!         collect_visible_objects,
//!         update_position_messages,
//!     )
//!         .chain(),
//! );
//! ```

use bevy_ecs::prelude::*;

use crate::events::visibility::PositionChanged;
use crate::resources::visibility::VisibleObjects;

/// Record every object reported as moved since this system last ran.
pub fn collect_visible_objects(
    mut reader: MessageReader<PositionChanged>,
    mut visible: ResMut<VisibleObjects>,
) {
    for message in reader.read() {
        visible.push(message.entity);
    }
}

/// Advance the ECS message queue for [`PositionChanged`].
///
/// Run once per tick after every reader, so messages live for one full tick.
pub fn update_position_messages(mut msgs: ResMut<Messages<PositionChanged>>) {
    msgs.update();
}
