//! Marker for nodes waiting to be finalized.
//!
//! Movement code inserts [`PendingFinalize`] (directly or through
//! [`request_finalize`](crate::systems::finalize::request_finalize)) after
//! changing a node's local position. The
//! [`finalize_pending_transforms`](crate::systems::finalize::finalize_pending_transforms)
//! system drains the markers once per tick.

use bevy_ecs::prelude::Component;

/// Finalize this node (and its subtree) on the next pass.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PendingFinalize;
