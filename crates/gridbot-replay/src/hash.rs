//! Hashing utilities for state and configuration comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they back equality checks during replay.

use gridbot_core::SimulationState;
use gridbot_engine::{CasePolicy, SessionConfig};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    hash = fnv1a_u32(hash, bytes.len() as u32);
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the world-visible parts of a state.
///
/// Covers the grid size, robot presence, position and facing, every
/// wall in insertion order, and the last report. The bookkeeping fields
/// (`last_command`, `last_status`, `last_message`) are left out: the frame
/// already records the status.
pub fn state_hash(state: &SimulationState) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, state.grid_size());

    match state.robot() {
        Some(robot) => {
            hash = fnv1a_byte(hash, 1);
            hash = fnv1a_u32(hash, robot.position.row);
            hash = fnv1a_u32(hash, robot.position.col);
            hash = fnv1a_byte(hash, robot.facing.index());
        }
        None => hash = fnv1a_byte(hash, 0),
    }

    hash = fnv1a_u32(hash, state.wall_count() as u32);
    for wall in state.walls() {
        hash = fnv1a_u32(hash, wall.row);
        hash = fnv1a_u32(hash, wall.col);
    }

    match state.last_report() {
        Some(report) => {
            hash = fnv1a_byte(hash, 1);
            hash = fnv1a_bytes(hash, report.as_bytes());
        }
        None => hash = fnv1a_byte(hash, 0),
    }
    hash
}

/// Hash the configuration settings that affect state evolution.
///
/// Capacities and notification lifetimes are display concerns and are
/// not included.
pub fn config_hash(config: &SessionConfig) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, config.grid_size);
    let policy = match config.case_policy {
        CasePolicy::Uppercase => 0,
        CasePolicy::Exact => 1,
    };
    fnv1a_byte(hash, policy)
}
