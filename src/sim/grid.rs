//! Uniform spatial grid for broad-phase collision candidates
//!
//! Rebuilt from scratch every frame and discarded afterwards; it is a derived
//! index, never authoritative state. Cells are sized so that any two
//! overlapping entity boxes always sit in the same or adjacent cells, which
//! turns the O(n²) all-pairs scan into near-linear work for spread-out
//! populations.

use std::collections::HashMap;

use glam::DVec2;

use super::state::Entity;

/// Integer cell coordinate. Positions can sit transiently below zero after a
/// bounce, so coordinates are signed.
pub type CellCoord = (i32, i32);

/// Cell containing `pos` for the given cell size.
#[inline]
pub fn cell_coord(cell_size: f64, pos: DVec2) -> CellCoord {
    (
        (pos.x / cell_size).floor() as i32,
        (pos.y / cell_size).floor() as i32,
    )
}

/// One frame's bucketing of entity indices by cell.
#[derive(Debug)]
pub struct SpatialGrid {
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl SpatialGrid {
    /// Bucket every entity by its current position. Each entity lands in
    /// exactly one cell.
    pub fn build(cell_size: f64, entities: &[Entity]) -> Self {
        debug_assert!(cell_size > 0.0);
        let mut cells: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        for (idx, entity) in entities.iter().enumerate() {
            cells
                .entry(cell_coord(cell_size, entity.pos))
                .or_default()
                .push(idx);
        }
        Self { cells }
    }

    /// Occupied cell coordinates in ascending order.
    ///
    /// The hash map's own iteration order is not stable across runs; sorting
    /// here is what makes the resolver's cell walk reproducible for a seed.
    pub fn occupied_cells(&self) -> Vec<CellCoord> {
        let mut coords: Vec<CellCoord> = self.cells.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Bucket for a single cell, if occupied.
    pub fn bucket(&self, cell: CellCoord) -> Option<&[usize]> {
        self.cells.get(&cell).map(Vec::as_slice)
    }

    /// Entity indices in `cell` and its eight neighbors, ascending.
    ///
    /// Buckets are disjoint, so concatenating the 3x3 block already yields a
    /// duplicate-free set; the sort only fixes ordering.
    pub fn neighborhood(&self, cell: CellCoord) -> Vec<usize> {
        let mut nearby = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cell.0 + dx, cell.1 + dy)) {
                    nearby.extend_from_slice(bucket);
                }
            }
        }
        nearby.sort_unstable();
        nearby
    }
}
