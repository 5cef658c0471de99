pub mod ai;
pub mod clock;
pub mod config;
pub mod error;
pub mod fruit;
pub mod grid;
pub mod input;
pub mod pathfinder;
pub mod render;
pub mod session;
pub mod snake;

pub use ai::Difficulty;
pub use config::{AiTuning, GameConfig};
pub use error::ConfigError;
pub use fruit::Fruit;
pub use grid::{Coord, Direction, Grid, Point};
pub use pathfinder::find_path;
pub use session::{Command, EndReason, GameSession, SessionState, Snapshot, TickResult, Verdict};
pub use snake::{Role, Snake};
