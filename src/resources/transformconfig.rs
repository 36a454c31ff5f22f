//! Transform subsystem configuration resource.
//!
//! Holds the defaults applied to freshly created transforms, the notice
//! toggle read by the relation observer, and the demo simulation settings.
//! Values are loaded from an INI file; keys missing from the file keep their
//! defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! default_world_id = 0
//! default_instance_id = 1
//!
//! [notices]
//! relation_changes = true
//!
//! [simulation]
//! ticks = 10
//! step = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::transform::{DEFAULT_INSTANCE_ID, DEFAULT_WORLD_ID, Transform};

const DEFAULT_RELATION_NOTICES: bool = true;
const DEFAULT_TICKS: u32 = 10;
const DEFAULT_STEP: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./transform.ini";

/// Failure to read or write the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    Load(String),
    #[error("Failed to save config file: {0}")]
    Save(String),
}

/// Transform configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct TransformConfig {
    /// World id given to transforms built by [`TransformConfig::new_transform`].
    pub default_world_id: u32,
    /// Instance id given to transforms built by [`TransformConfig::new_transform`].
    pub default_instance_id: u32,
    /// Turn relation changes into chat notices for player-like owners.
    pub relation_notices: bool,
    /// Number of ticks the demo simulates.
    pub ticks: u32,
    /// Distance the demo ship moves per tick.
    pub step: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            default_world_id: DEFAULT_WORLD_ID,
            default_instance_id: DEFAULT_INSTANCE_ID,
            relation_notices: DEFAULT_RELATION_NOTICES,
            ticks: DEFAULT_TICKS,
            step: DEFAULT_STEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;

        // [world] section
        if let Some(world_id) = config.getuint("world", "default_world_id").ok().flatten() {
            self.default_world_id = world_id as u32;
        }
        if let Some(instance_id) = config
            .getuint("world", "default_instance_id")
            .ok()
            .flatten()
        {
            self.default_instance_id = instance_id as u32;
        }

        // [notices] section
        if let Some(enabled) = config.getbool("notices", "relation_changes").ok().flatten() {
            self.relation_notices = enabled;
        }

        // [simulation] section
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = ticks as u32;
        }
        if let Some(step) = config.getfloat("simulation", "step").ok().flatten() {
            self.step = step as f32;
        }

        info!(
            "Loaded config: world={}, instance={}, notices={}, ticks={}, step={}",
            self.default_world_id,
            self.default_instance_id,
            self.relation_notices,
            self.ticks,
            self.step
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set(
            "world",
            "default_world_id",
            Some(self.default_world_id.to_string()),
        );
        config.set(
            "world",
            "default_instance_id",
            Some(self.default_instance_id.to_string()),
        );
        config.set(
            "notices",
            "relation_changes",
            Some(self.relation_notices.to_string()),
        );
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "step", Some(self.step.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Transform at the origin carrying the configured world and instance.
    pub fn new_transform(&self) -> Transform {
        Transform::new().with_location(self.default_world_id, 0, self.default_instance_id)
    }
}
