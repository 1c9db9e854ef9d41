//! RPS Arena - a rock-paper-scissors particle battle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spatial grid, conversions)
//! - `settings`: Run configuration, validation, entity size scaling
//!
//! Rendering, on-screen statistics, and the victory celebration are external
//! consumers: they read the [`sim::StepResult`] handed out by the frame loop
//! and never mutate simulation state.

pub mod settings;
pub mod sim;

pub use settings::{SimConfig, scaled_entity_size};
pub use sim::{Entity, SimParams, SimState, Species, StepResult, step};

/// Simulation constants
pub mod consts {
    /// Smallest collision box edge, reached at the largest populations.
    pub const MIN_ENTITY_SIZE: f64 = 5.0;
    /// Largest collision box edge, used for tiny populations.
    pub const MAX_ENTITY_SIZE: f64 = 35.0;

    /// Population range (per species) covered by the size scaling curve.
    pub const MIN_ENTITIES: u32 = 3;
    pub const MAX_ENTITIES: u32 = 2000;

    /// Initial speed magnitude range; the sign of each axis is randomized
    /// independently at spawn.
    pub const MIN_START_SPEED: f64 = 1.0;
    pub const MAX_START_SPEED: f64 = 2.0;

    /// Grid cells are twice the entity size, so overlapping boxes always
    /// land in the same or adjacent cells.
    pub const CELL_SIZE_FACTOR: f64 = 2.0;
}
