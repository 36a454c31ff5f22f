//! Serializable spawn location.
//!
//! [`WorldSpawnPosition`] is the flat record used in spawn tables and saves:
//! world and zone keys plus an absolute position and rotation. Field names are
//! serialized in PascalCase to match the data files.
//!
//! # Example
//!
//! ```ignore
//! let spawn = WorldSpawnPosition::from_json(
//!     r#"{"WorldId":0,"ZoneId":129,"X":10.0,"Y":20.0,"Z":5.0,"Roll":0.0,"Pitch":0.0,"Yaw":1.5}"#,
//! )?;
//! apply_world_spawn_position(&mut world, entity, &spawn, 0);
//! ```
//!
//! # Related
//!
//! - [`crate::systems::spawnposition`] – apply/clone helpers

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Absolute location record: integer world and zone keys plus world-space coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorldSpawnPosition {
    pub world_id: u32,
    pub zone_id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub roll: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
}

impl WorldSpawnPosition {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Roll, pitch, yaw packed like [`PositionAndRotation`](super::posrot::PositionAndRotation) stores them.
    pub fn rotation(&self) -> Vec3 {
        Vec3::new(self.roll, self.pitch, self.yaw)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
