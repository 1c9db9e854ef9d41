//! Run configuration
//!
//! User-facing knobs (population size, arena dimensions, seed) and the
//! mapping from population size to entity size. Persisted as a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_ENTITIES, MAX_ENTITY_SIZE, MIN_ENTITIES, MIN_ENTITY_SIZE};
use crate::sim::SimParams;

/// Errors raised when loading or saving a configuration file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read/write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Entity size shrinks exponentially as the population grows, so large
/// battles stay readable and grid cells stay proportional to the boxes.
pub fn scaled_entity_size(entity_count: u32) -> f64 {
    let clamped = entity_count.clamp(MIN_ENTITIES, MAX_ENTITIES);
    let scale = (clamped - MIN_ENTITIES) as f64 / (MAX_ENTITIES - MIN_ENTITIES) as f64;
    (MAX_ENTITY_SIZE * (-scale * 4.0).exp()).max(MIN_ENTITY_SIZE)
}

/// Serializable run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Entities spawned per species.
    pub entity_count: u32,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Explicit collision box edge; when absent the scaled size is used.
    #[serde(default)]
    pub entity_size: Option<f64>,
    /// Run seed; when absent the driver derives one from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            entity_count: 100,
            arena_width: 1180.0,
            arena_height: 580.0,
            entity_size: None,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Resolve into the immutable per-run parameters.
    pub fn params(&self) -> SimParams {
        SimParams {
            entity_size: self
                .entity_size
                .unwrap_or_else(|| scaled_entity_size(self.entity_count)),
            arena_width: self.arena_width,
            arena_height: self.arena_height,
            entity_count: self.entity_count,
        }
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }
}
