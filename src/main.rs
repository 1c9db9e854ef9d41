//! RPS Arena entry point
//!
//! Headless driver: builds a simulation from config, then runs an explicit
//! frame loop until one species has converted everything. A renderer or
//! stats display would consume the same `StepResult` this loop hands out;
//! cancellation is simply the loop not calling `step()` again.

use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use rps_arena::settings::SimConfig;
use rps_arena::sim::{SimState, step};

/// Upper bound so a degenerate run cannot spin forever.
const MAX_FRAMES: u64 = 500_000;

/// Frames between progress log lines.
const LOG_INTERVAL: u64 = 600;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load config {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(clock_seed);
    let params = config.params();
    let mut state = match SimState::new(params, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "arena {}x{}, {} entities per species, entity size {:.1}, seed {seed}",
        params.arena_width,
        params.arena_height,
        params.entity_count,
        params.entity_size,
    );

    loop {
        let result = step(&mut state);
        if result.converged {
            let winner = result.winner.expect("converged result carries a winner");
            println!(
                "{} wins after {} frames",
                winner.as_str().to_uppercase(),
                state.time_ticks
            );
            break;
        }
        if state.time_ticks % LOG_INTERVAL == 0 {
            log::info!(
                "frame {}: rock {} paper {} scissors {}",
                state.time_ticks,
                result.counts.rock,
                result.counts.paper,
                result.counts.scissors,
            );
        }
        if state.time_ticks >= MAX_FRAMES {
            log::warn!("no convergence after {MAX_FRAMES} frames, stopping");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
