//! Benchmark profiles and utilities for the Gridbot simulator.
//!
//! - [`reference_profile`]: the default 5x5 session
//! - [`stress_profile`]: a 256x256 session with a long log
//! - [`random_script`]: seeded command scripts mixing every verb

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridbot_core::{Facing, Verb};
use gridbot_engine::SessionConfig;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The default 5x5 session.
pub fn reference_profile() -> SessionConfig {
    SessionConfig::default()
}

/// A 256x256 session retaining 4096 log entries.
pub fn stress_profile() -> SessionConfig {
    SessionConfig {
        grid_size: 256,
        log_capacity: 4096,
        ..SessionConfig::default()
    }
}

/// Generate a deterministic script of `len` command lines.
///
/// Mostly well-formed commands with coordinates in `[0, grid_size + 1]`,
/// so some placements fall off the grid. About one line in twenty is an
/// unknown verb.
pub fn random_script(seed: u64, len: usize, grid_size: u32) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let hi = grid_size + 1;
    (0..len)
        .map(|_| {
            if rng.random_range(0..20) == 0 {
                return "JUMP".to_string();
            }
            let verb = Verb::ALL[rng.random_range(0..Verb::ALL.len())];
            match verb {
                Verb::PlaceRobot => {
                    let facing = Facing::ALL[rng.random_range(0..4)];
                    format!(
                        "{} {},{},{}",
                        verb,
                        rng.random_range(0..=hi),
                        rng.random_range(0..=hi),
                        facing
                    )
                }
                Verb::PlaceWall => format!(
                    "{} {},{}",
                    verb,
                    rng.random_range(0..=hi),
                    rng.random_range(0..=hi)
                ),
                _ => verb.name().to_string(),
            }
        })
        .collect()
}
