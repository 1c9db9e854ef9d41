//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - One fixed update order per frame
//! - Seeded RNG only
//! - Stable iteration order (cells by coordinate, pairs by entity index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Conversion, aabb_overlap, apply_conversions, collect_conversions};
pub use grid::{CellCoord, SpatialGrid, cell_coord};
pub use state::{
    Entity, ParamsError, SimParams, SimState, Species, SpeciesCounts, StepResult,
};
pub use tick::step;
