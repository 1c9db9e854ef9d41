//! Entity store and core simulation types
//!
//! The whole mutable state of a run lives in [`SimState`]: the caller owns it
//! and passes it into every core operation. No module-level globals.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_START_SPEED, MIN_START_SPEED};

/// The three species locked in cyclic dominance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Rock,
    Paper,
    Scissors,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Rock, Species::Paper, Species::Scissors];

    /// The species this one converts on contact.
    pub fn prey(self) -> Species {
        match self {
            Species::Rock => Species::Scissors,
            Species::Paper => Species::Rock,
            Species::Scissors => Species::Paper,
        }
    }

    /// True if `self` converts `other` on contact.
    ///
    /// Exactly one of `a.beats(b)` / `b.beats(a)` holds for differing species.
    pub fn beats(self, other: Species) -> bool {
        self.prey() == other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Rock => "rock",
            Species::Paper => "paper",
            Species::Scissors => "scissors",
        }
    }
}

/// A single particle. Identity is the index in the store; entities are never
/// inserted or removed between resets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub species: Species,
    pub pos: DVec2,
    pub vel: DVec2,
}

/// Parameters fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Shared collision box edge for every entity.
    pub entity_size: f64,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Entities spawned per species; total population is three times this.
    pub entity_count: u32,
}

/// Errors raised when validating run parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("entity_count must be non-zero")]
    ZeroEntityCount,
    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("entity_size must be positive, got {0}")]
    InvalidEntitySize(f64),
    #[error("arena {width}x{height} cannot hold an entity of size {size}")]
    ArenaTooSmall { width: f64, height: f64, size: f64 },
}

impl SimParams {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.entity_count == 0 {
            return Err(ParamsError::ZeroEntityCount);
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ParamsError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.entity_size > 0.0) {
            return Err(ParamsError::InvalidEntitySize(self.entity_size));
        }
        if self.arena_width <= self.entity_size || self.arena_height <= self.entity_size {
            return Err(ParamsError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                size: self.entity_size,
            });
        }
        Ok(())
    }
}

/// Per-species population tallies for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCounts {
    pub rock: u32,
    pub paper: u32,
    pub scissors: u32,
}

impl SpeciesCounts {
    pub fn get(&self, species: Species) -> u32 {
        match species {
            Species::Rock => self.rock,
            Species::Paper => self.paper,
            Species::Scissors => self.scissors,
        }
    }

    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }
}

/// Read-only outcome of one frame, handed to rendering and stats consumers.
///
/// The entity list is an owned snapshot; mutating it cannot feed back into
/// the store.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Full entity store after this frame's conversions, in store order.
    pub entities: Vec<Entity>,
    /// Per-species tallies after the update.
    pub counts: SpeciesCounts,
    /// True when every entity shares one species; the driver stops
    /// scheduling frames once this is set.
    pub converged: bool,
    /// The surviving species, set iff `converged`.
    pub winner: Option<Species>,
}

/// Complete simulation state: entity store, run parameters, and seeded RNG.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility.
    pub seed: u64,
    /// Immutable for the duration of one run; replaced only by `reset`.
    pub params: SimParams,
    /// Frame counter.
    pub time_ticks: u64,
    /// All live entities, index-stable for the lifetime of a run.
    pub entities: Vec<Entity>,
    rng: Pcg32,
}

impl SimState {
    /// Create a fully populated simulation, or fail fast on bad parameters.
    pub fn new(params: SimParams, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;
        let mut state = Self {
            seed,
            params,
            time_ticks: 0,
            entities: Vec::with_capacity(3 * params.entity_count as usize),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.populate();
        Ok(state)
    }

    /// Clear the store and respawn the full population under new parameters.
    ///
    /// Reseeds the RNG, so resetting with identical parameters replays the
    /// run bit-exact.
    pub fn reset(&mut self, params: SimParams) -> Result<(), ParamsError> {
        params.validate()?;
        self.params = params;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.entities.clear();
        self.populate();
        Ok(())
    }

    /// Spawn `entity_count` entities of each species in its starting band.
    fn populate(&mut self) {
        for species in Species::ALL {
            for _ in 0..self.params.entity_count {
                let pos = self.spawn_position(species);
                let speed = self.rng.random_range(MIN_START_SPEED..MAX_START_SPEED);
                let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                self.entities.push(Entity {
                    species,
                    pos,
                    vel: DVec2::new(speed * sx, speed * sy),
                });
            }
        }
    }

    /// Band placement keeps opposing species visually separated at the start:
    /// rock in the left third, paper in the upper middle, scissors in the
    /// right third. The band shapes are a presentation choice, not
    /// load-bearing for correctness.
    fn spawn_position(&mut self, species: Species) -> DVec2 {
        let w = self.params.arena_width;
        let h = self.params.arena_height;
        let size = self.params.entity_size;
        let (x_lo, x_hi, y_lo, y_hi) = match species {
            Species::Rock => (0.0, w * 0.33, h / 2.0, h - size),
            Species::Paper => (w * 0.33, w * 0.66, 0.0, h * 0.2),
            Species::Scissors => (w * 0.66, w - size, h / 2.0, h - size),
        };
        // Both band edges are clamped: in a cramped arena a band's lower
        // edge can itself sit past `arena - size`.
        DVec2::new(
            self.sample_coord(x_lo.min(w - size), x_hi.min(w - size)),
            self.sample_coord(y_lo.min(h - size), y_hi.min(h - size)),
        )
    }

    /// Uniform draw at integer resolution over `[lo, hi]`.
    fn sample_coord(&mut self, lo: f64, hi: f64) -> f64 {
        let lo = lo.floor().max(0.0) as i64;
        let hi = (hi.floor() as i64).max(lo);
        self.rng.random_range(lo..=hi) as f64
    }

    /// Per-species tallies over the whole store.
    pub fn counts(&self) -> SpeciesCounts {
        let mut counts = SpeciesCounts::default();
        for e in &self.entities {
            match e.species {
                Species::Rock => counts.rock += 1,
                Species::Paper => counts.paper += 1,
                Species::Scissors => counts.scissors += 1,
            }
        }
        counts
    }

    /// The single surviving species, if every entity shares it.
    ///
    /// Returns `None` while the population is still mixed (or empty).
    pub fn winning_species(&self) -> Option<Species> {
        let first = self.entities.first()?.species;
        self.entities
            .iter()
            .all(|e| e.species == first)
            .then_some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimParams {
        SimParams {
            entity_size: 5.0,
            arena_width: 400.0,
            arena_height: 300.0,
            entity_count: 50,
        }
    }

    #[test]
    fn test_dominance_is_cyclic() {
        for species in Species::ALL {
            assert!(species.beats(species.prey()));
            assert!(!species.prey().beats(species));
            assert!(!species.beats(species));
        }
        // Every species is dominated by exactly one other.
        for victim in Species::ALL {
            let dominators = Species::ALL
                .iter()
                .filter(|s| s.beats(victim))
                .count();
            assert_eq!(dominators, 1);
        }
    }

    #[test]
    fn test_new_spawns_equal_thirds() {
        let state = SimState::new(params(), 7).unwrap();
        let counts = state.counts();
        for species in Species::ALL {
            assert_eq!(counts.get(species), 50);
        }
        assert_eq!(counts.total(), 150);
        assert_eq!(state.entities.len(), 150);
    }

    #[test]
    fn test_spawn_positions_inside_bands() {
        let p = params();
        let state = SimState::new(p, 42).unwrap();
        for e in &state.entities {
            assert!(e.pos.x >= 0.0 && e.pos.x <= p.arena_width - p.entity_size);
            assert!(e.pos.y >= 0.0 && e.pos.y <= p.arena_height - p.entity_size);
            match e.species {
                Species::Rock => assert!(e.pos.x <= p.arena_width * 0.33),
                Species::Paper => {
                    assert!(e.pos.x >= (p.arena_width * 0.33).floor());
                    assert!(e.pos.y <= p.arena_height * 0.2);
                }
                Species::Scissors => assert!(e.pos.x >= (p.arena_width * 0.66).floor()),
            }
        }
    }

    #[test]
    fn test_spawn_clamped_in_cramped_arena() {
        // Entity nearly as large as the arena: every band's edges collapse
        // onto [0, arena - size] and placement must still respect it.
        let p = SimParams {
            entity_size: 6.0,
            arena_width: 12.0,
            arena_height: 12.0,
            entity_count: 20,
        };
        let state = SimState::new(p, 11).unwrap();
        for e in &state.entities {
            assert!(e.pos.x >= 0.0 && e.pos.x <= p.arena_width - p.entity_size);
            assert!(e.pos.y >= 0.0 && e.pos.y <= p.arena_height - p.entity_size);
        }
    }

    #[test]
    fn test_spawn_speed_range() {
        let state = SimState::new(params(), 99).unwrap();
        for e in &state.entities {
            assert!(e.vel.x.abs() >= 1.0 && e.vel.x.abs() < 2.0);
            assert!(e.vel.y.abs() >= 1.0 && e.vel.y.abs() < 2.0);
            // Shared magnitude per entity, signs independent.
            assert!((e.vel.x.abs() - e.vel.y.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let mut p = params();
        p.entity_count = 0;
        assert_eq!(p.validate(), Err(ParamsError::ZeroEntityCount));

        let mut p = params();
        p.arena_height = 0.0;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidArena { .. })));

        let mut p = params();
        p.entity_size = -1.0;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::InvalidEntitySize(_))
        ));

        let mut p = params();
        p.entity_size = 500.0;
        assert!(matches!(p.validate(), Err(ParamsError::ArenaTooSmall { .. })));
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut state = SimState::new(params(), 123).unwrap();
        let first_spawn = state.entities.clone();
        state.reset(params()).unwrap();
        assert_eq!(state.entities, first_spawn);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_winning_species() {
        let mut state = SimState::new(params(), 5).unwrap();
        assert_eq!(state.winning_species(), None);
        for e in &mut state.entities {
            e.species = Species::Paper;
        }
        assert_eq!(state.winning_species(), Some(Species::Paper));
    }
}
