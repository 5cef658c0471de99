use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::config::AiTuning;
use crate::grid::{Direction, Grid, Point};
use crate::pathfinder::find_path;
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Self::Easy => &Wanderer,
            Self::Normal => &Ranged,
            Self::Hard => &Chaser,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Everything the AI may look at when choosing a step.
#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub grid: &'a Grid,
    pub snake: &'a Snake,
    pub fruit: Point,
    /// Both bodies, minus this snake's own head.
    pub obstacles: &'a HashSet<Point>,
    pub tuning: AiTuning,
}

pub trait Strategy {
    /// A step toward the fruit, or `None` to let the fallback choose.
    fn pick(&self, s: &Situation<'_>, rng: &mut dyn RngCore) -> Option<Direction>;
}

/// Hard: always pathfinds.
#[derive(Debug, Clone, Copy)]
pub struct Chaser;

/// Normal: pathfinds only when the fruit is close.
#[derive(Debug, Clone, Copy)]
pub struct Ranged;

/// Easy: sometimes wanders off, otherwise pathfinds.
#[derive(Debug, Clone, Copy)]
pub struct Wanderer;

impl Strategy for Chaser {
    fn pick(&self, s: &Situation<'_>, _rng: &mut dyn RngCore) -> Option<Direction> {
        first_step(s)
    }
}

impl Strategy for Ranged {
    fn pick(&self, s: &Situation<'_>, _rng: &mut dyn RngCore) -> Option<Direction> {
        if s.snake.head().manhattan(s.fruit) < s.tuning.search_radius {
            first_step(s)
        } else {
            None
        }
    }
}

impl Strategy for Wanderer {
    fn pick(&self, s: &Situation<'_>, rng: &mut dyn RngCore) -> Option<Direction> {
        if rng.random::<f64>() < s.tuning.wander_chance {
            if let Some(dir) = random_safe(s, rng) {
                return Some(dir);
            }
        }
        first_step(s)
    }
}

/// Chooses this tick's direction for the snake in `s`.
pub fn decide(difficulty: Difficulty, s: &Situation<'_>, rng: &mut dyn RngCore) -> Direction {
    difficulty
        .strategy()
        .pick(s, rng)
        .or_else(|| random_safe(s, rng))
        .unwrap_or_else(|| s.snake.heading())
}

/// Steps that stay on the grid, miss the snake's own body and do not reverse.
/// The other snake is not considered.
pub fn safe_directions(s: &Situation<'_>) -> Vec<Direction> {
    let head = s.snake.head();
    Direction::SCAN_ORDER
        .into_iter()
        .filter(|d| !d.is_opposite(s.snake.heading()))
        .filter(|&d| {
            let next = head.step(d);
            s.grid.in_bounds(next) && !s.snake.contains(next)
        })
        .collect()
}

fn random_safe(s: &Situation<'_>, rng: &mut dyn RngCore) -> Option<Direction> {
    safe_directions(s).choose(rng).copied()
}

fn first_step(s: &Situation<'_>) -> Option<Direction> {
    find_path(s.grid, s.snake.head(), s.fruit, s.obstacles)?
        .first()
        .copied()
}
