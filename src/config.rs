use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::{Coord, Grid, Point};

/// Knobs for the computer-controlled snake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    /// Easy: chance per tick of ignoring the fruit and wandering.
    pub wander_chance: f64,
    /// Normal: pathfinding only kicks in below this Manhattan distance.
    pub search_radius: u32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            wander_chance: 0.3,
            search_radius: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    /// Episode length in play time (pauses excluded).
    pub time_limit: Duration,
    /// Ordinary fruit is moved when it has sat this long without being eaten.
    pub respawn_interval: Duration,
    /// Random draws tried before accepting an occupied cell for a fruit.
    pub spawn_attempts: u32,
    /// Distance of each snake's start cell from its side wall.
    pub start_inset: Coord,
    pub ai: AiTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            time_limit: Duration::from_secs(120),
            respawn_interval: Duration::from_secs(10),
            spawn_attempts: 10,
            start_inset: 5,
            ai: AiTuning::default(),
        }
    }
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.width, self.height)
    }

    pub fn player_start(&self) -> Point {
        Point::new(self.start_inset, self.height / 2)
    }

    pub fn ai_start(&self) -> Point {
        Point::new(self.width - 1 - self.start_inset, self.height / 2)
    }

    /// Checks every invariant the session relies on.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let grid = self.grid()?;

        let (player, ai) = (self.player_start(), self.ai_start());
        if !grid.in_bounds(player) || !grid.in_bounds(ai) || player.x >= ai.x {
            return Err(ConfigError::StartCells { player, ai });
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.respawn_interval.is_zero() {
            return Err(ConfigError::ZeroRespawnInterval);
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        if !(0.0..=1.0).contains(&self.ai.wander_chance) {
            return Err(ConfigError::WanderChance(self.ai.wander_chance));
        }
        Ok(grid)
    }
}
