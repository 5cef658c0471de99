use thiserror::Error;

use crate::grid::{Coord, Point};

/// Configuration problems detected before the first tick runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have positive dimensions, got {width}x{height}")]
    EmptyGrid { width: Coord, height: Coord },

    #[error("start cells {player:?} (player) and {ai:?} (ai) must be in bounds, with the player left of the ai")]
    StartCells { player: Point, ai: Point },

    #[error("time limit must be non-zero")]
    ZeroTimeLimit,

    #[error("fruit respawn interval must be non-zero")]
    ZeroRespawnInterval,

    #[error("fruit placement needs at least one attempt")]
    ZeroSpawnAttempts,

    #[error("wander chance must lie in [0, 1], got {0}")]
    WanderChance(f64),
}
