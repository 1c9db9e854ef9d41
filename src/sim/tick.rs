//! Per-frame simulation step
//!
//! Frame order is fixed: integrate positions, reflect velocities at the
//! walls, rebuild the spatial grid, resolve conversions, then report
//! convergence. The caller owns the loop; stopping the simulation is simply
//! not calling [`step`] again.

use crate::consts::CELL_SIZE_FACTOR;

use super::collision::{apply_conversions, collect_conversions};
use super::grid::SpatialGrid;
use super::state::{SimState, StepResult};

/// Advance the simulation by one frame.
///
/// `converged` reflects the store after this frame's conversions, so the
/// frame that produces a single-species population reports it immediately.
///
/// # Panics
///
/// Panics if the entity store is empty; stepping before a populated
/// `SimState` exists is a programming error, not a runtime condition.
pub fn step(state: &mut SimState) -> StepResult {
    assert!(
        !state.entities.is_empty(),
        "step on an empty entity store; construct or reset the simulation first"
    );

    state.time_ticks += 1;
    integrate(state);

    let grid = SpatialGrid::build(
        state.params.entity_size * CELL_SIZE_FACTOR,
        &state.entities,
    );
    let conversions = collect_conversions(&state.entities, &grid, state.params.entity_size);
    apply_conversions(&mut state.entities, &conversions);

    let counts = state.counts();
    let winner = state.winning_species();
    StepResult {
        entities: state.entities.clone(),
        counts,
        converged: winner.is_some(),
        winner,
    }
}

/// Position-then-reflect boundary policy.
///
/// The position update always lands first; a boundary hit only negates that
/// axis's velocity for the next frame, with no clamping back inside. An
/// entity can therefore sit slightly outside the arena for one frame after a
/// bounce, displaced by at most its per-axis speed.
fn integrate(state: &mut SimState) {
    let w = state.params.arena_width;
    let h = state.params.arena_height;
    let size = state.params.entity_size;
    for e in &mut state.entities {
        e.pos += e.vel;
        if e.pos.x <= 0.0 || e.pos.x >= w - size {
            e.vel.x = -e.vel.x;
        }
        if e.pos.y <= 0.0 || e.pos.y >= h - size {
            e.vel.y = -e.vel.y;
        }
    }
}
