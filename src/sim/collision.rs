//! Narrow-phase overlap testing and conversion resolution
//!
//! Detection and mutation are decoupled: every overlapping differing-species
//! pair across all cells is collected into one list before any species flips,
//! so a conversion can never feed back into the same frame's detection.

use glam::DVec2;

use super::grid::SpatialGrid;
use super::state::Entity;

/// One detected contact, oriented winner-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// Index of the dominating entity.
    pub winner: usize,
    /// Index of the entity that flips to the winner's species.
    pub loser: usize,
}

/// Axis-aligned box overlap, both boxes `size` wide with the position as
/// origin. Strict inequalities: boxes that merely touch do not collide.
#[inline]
pub fn aabb_overlap(a: DVec2, b: DVec2, size: f64) -> bool {
    a.x < b.x + size && a.x + size > b.x && a.y < b.y + size && a.y + size > b.y
}

/// Enumerate every overlapping differing-species pair via the grid.
///
/// Cells are walked in coordinate order and each 3x3 neighborhood is paired
/// exhaustively. A pair near a cell border is seen from several neighborhoods,
/// so the collected list is sorted by `(winner, loser)` and deduplicated;
/// together with the seeded RNG this makes a run bit-exact.
pub fn collect_conversions(
    entities: &[Entity],
    grid: &SpatialGrid,
    entity_size: f64,
) -> Vec<Conversion> {
    let mut conversions = Vec::new();
    for cell in grid.occupied_cells() {
        let nearby = grid.neighborhood(cell);
        for (n, &i) in nearby.iter().enumerate() {
            for &j in &nearby[n + 1..] {
                let a = &entities[i];
                let b = &entities[j];
                if a.species == b.species {
                    continue;
                }
                if !aabb_overlap(a.pos, b.pos, entity_size) {
                    continue;
                }
                // Exactly one side dominates in a cyclic triple.
                let conversion = if a.species.beats(b.species) {
                    Conversion { winner: i, loser: j }
                } else {
                    Conversion { winner: j, loser: i }
                };
                conversions.push(conversion);
            }
        }
    }
    conversions.sort_unstable_by_key(|c| (c.winner, c.loser));
    conversions.dedup();
    conversions
}

/// Apply collected conversions in list order.
///
/// The winner's species is read at application time, so a winner that already
/// flipped earlier in the pass propagates its new species. An entity losing in
/// several pairs flips once per entry; the last application wins. Both are
/// deliberate: they produce the "majority contact wins" dynamic where a
/// dominant species sweeps through a cluster.
pub fn apply_conversions(entities: &mut [Entity], conversions: &[Conversion]) {
    for conversion in conversions {
        entities[conversion.loser].species = entities[conversion.winner].species;
    }
}
