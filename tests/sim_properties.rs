//! Whole-run invariants checked over randomized seeds and populations.

use proptest::prelude::*;
use rps_arena::consts::MAX_START_SPEED;
use rps_arena::sim::{SimParams, SimState, step};

fn params(entity_count: u32) -> SimParams {
    SimParams {
        entity_size: 5.0,
        arena_width: 400.0,
        arena_height: 300.0,
        entity_count,
    }
}

proptest! {
    /// Conversions change species, never the population size.
    #[test]
    fn population_is_invariant(seed in any::<u64>(), count in 1u32..40) {
        let mut state = SimState::new(params(count), seed).unwrap();
        for _ in 0..50 {
            let result = step(&mut state);
            prop_assert_eq!(result.counts.total(), 3 * count);
            prop_assert_eq!(result.entities.len() as u32, 3 * count);
            if result.converged {
                break;
            }
        }
    }

    /// Entities may overshoot a wall for one frame, but never by more than
    /// one frame's per-axis displacement.
    #[test]
    fn entities_stay_near_the_arena(seed in any::<u64>(), count in 1u32..40) {
        let p = params(count);
        let mut state = SimState::new(p, seed).unwrap();
        let eps = MAX_START_SPEED;
        for _ in 0..200 {
            let result = step(&mut state);
            for e in &result.entities {
                prop_assert!(e.pos.x >= -eps && e.pos.x <= p.arena_width + eps);
                prop_assert!(e.pos.y >= -eps && e.pos.y <= p.arena_height + eps);
            }
            if result.converged {
                break;
            }
        }
    }

    /// `converged` is set exactly when one species holds the whole store.
    #[test]
    fn convergence_matches_counts(seed in any::<u64>(), count in 1u32..20) {
        let mut state = SimState::new(params(count), seed).unwrap();
        for _ in 0..300 {
            let result = step(&mut state);
            let total = result.counts.total();
            let single_species = result.counts.rock == total
                || result.counts.paper == total
                || result.counts.scissors == total;
            prop_assert_eq!(result.converged, single_species);
            prop_assert_eq!(result.winner.is_some(), result.converged);
            if result.converged {
                break;
            }
        }
    }

    /// Two simulations with the same seed and parameters are bit-identical.
    #[test]
    fn runs_are_reproducible(seed in any::<u64>()) {
        let mut a = SimState::new(params(25), seed).unwrap();
        let mut b = SimState::new(params(25), seed).unwrap();
        for _ in 0..40 {
            let ra = step(&mut a);
            let rb = step(&mut b);
            prop_assert_eq!(&ra.entities, &rb.entities);
            if ra.converged {
                break;
            }
        }
    }
}
