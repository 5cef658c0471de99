use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::{self, Difficulty, Situation};
use crate::clock::PlayClock;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::fruit::{Fruit, ORDINARY_POINTS, SPECIAL_FRUITS};
use crate::grid::{Direction, Grid, Point};
use crate::snake::{Role, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Input events. Each one is ignored outside the state it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Playing only. Applied at the start of the next tick.
    SetPlayerDirection(Direction),
    /// Playing <-> Paused.
    TogglePause,
    /// Menu only.
    SelectDifficulty(Difficulty),
    /// Menu only.
    StartEpisode,
    /// GameOver only.
    RestartToMenu,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    /// At least one flag is set.
    Crash { player: bool, ai: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    PlayerWins,
    AiWins,
    Draw,
}

/// UI-agnostic result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub state: SessionState,
    pub player_ate: bool,
    pub ai_ate: bool,
    /// Points of the special fruit that appeared this tick, if any.
    pub special_spawned: Option<u32>,
    pub end: Option<EndReason>,
}

impl TickResult {
    fn idle(state: SessionState) -> Self {
        Self {
            state,
            player_ate: false,
            ai_ate: false,
            special_spawned: None,
            end: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialMark {
    pub at: Duration,
    pub points: u32,
    pub fired: bool,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: SessionState,
    pub difficulty: Difficulty,
    pub grid: Grid,
    pub player: &'a Snake,
    pub ai: &'a Snake,
    pub fruit: Fruit,
    pub elapsed: Duration,
    /// Whole seconds left, as shown on the status line.
    pub remaining_secs: u64,
    pub specials: [SpecialMark; 3],
    pub end: Option<EndReason>,
    pub verdict: Option<Verdict>,
}

#[derive(Debug)]
pub struct GameSession {
    cfg: GameConfig,
    grid: Grid,
    state: SessionState,
    difficulty: Difficulty,
    player: Snake,
    ai: Snake,
    fruit: Fruit,
    /// Player input waiting for the next tick.
    pending_dir: Option<Direction>,
    /// `None` until an episode starts.
    clock: Option<PlayClock>,
    special_fired: [bool; 3],
    end: Option<EndReason>,
    rng: ChaCha8Rng,
}

impl GameSession {
    pub fn with_seed(cfg: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Validates `cfg` and parks the session in the menu.
    pub fn with_rng(cfg: GameConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let grid = cfg.validate()?;
        let player = Snake::new(Role::Player, cfg.player_start(), Direction::Right);
        let ai = Snake::new(Role::Ai, cfg.ai_start(), Direction::Left);
        let mut session = Self {
            cfg,
            grid,
            state: SessionState::Menu,
            difficulty: Difficulty::default(),
            player,
            ai,
            fruit: Fruit {
                position: Point::new(0, 0),
                points: ORDINARY_POINTS,
                spawned_at: Duration::ZERO,
            },
            pending_dir: None,
            clock: None,
            special_fired: [false; 3],
            end: None,
            rng,
        };
        session.reset_episode();
        Ok(session)
    }

    /// Create a session with a non-deterministic seed.
    pub fn new(cfg: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::from_os_rng())
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    pub fn ai(&self) -> &Snake {
        &self.ai
    }

    pub fn fruit(&self) -> Fruit {
        self.fruit
    }

    pub fn special_fired(&self) -> [bool; 3] {
        self.special_fired
    }

    /// Play time of the current episode. Zero in the menu, frozen after the
    /// episode ends.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.map_or(Duration::ZERO, |c| c.elapsed(now))
    }

    pub fn verdict(&self) -> Option<Verdict> {
        if self.state != SessionState::GameOver {
            return None;
        }
        let (p, a) = (self.player.score(), self.ai.score());
        Some(match p.cmp(&a) {
            std::cmp::Ordering::Greater => Verdict::PlayerWins,
            std::cmp::Ordering::Less => Verdict::AiWins,
            std::cmp::Ordering::Equal => Verdict::Draw,
        })
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        let elapsed = self.elapsed(now);
        let mut specials = [SpecialMark {
            at: Duration::ZERO,
            points: 0,
            fired: false,
        }; 3];
        for (slot, (special, fired)) in specials
            .iter_mut()
            .zip(SPECIAL_FRUITS.iter().zip(self.special_fired))
        {
            *slot = SpecialMark {
                at: special.at,
                points: special.points,
                fired,
            };
        }

        Snapshot {
            state: self.state,
            difficulty: self.difficulty,
            grid: self.grid,
            player: &self.player,
            ai: &self.ai,
            fruit: self.fruit,
            elapsed,
            remaining_secs: self
                .cfg
                .time_limit
                .as_secs()
                .saturating_sub(elapsed.as_secs()),
            specials,
            end: self.end,
            verdict: self.verdict(),
        }
    }

    /// Applies one input event. Returns true if the caller should quit.
    pub fn handle(&mut self, cmd: Command, now: Instant) -> bool {
        match (cmd, self.state) {
            (Command::Quit, _) => return true,

            (Command::SetPlayerDirection(dir), SessionState::Playing) => {
                self.pending_dir = Some(dir);
            }

            (Command::TogglePause, SessionState::Playing) => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.pause(now);
                }
                self.state = SessionState::Paused;
                debug!("paused at {:?}", self.elapsed(now));
            }
            (Command::TogglePause, SessionState::Paused) => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.resume(now);
                }
                self.state = SessionState::Playing;
                debug!("resumed at {:?}", self.elapsed(now));
            }

            (Command::SelectDifficulty(difficulty), SessionState::Menu) => {
                self.difficulty = difficulty;
                debug!("difficulty set to {}", difficulty.label());
            }

            (Command::StartEpisode, SessionState::Menu) => {
                self.reset_episode();
                self.clock = Some(PlayClock::start(now));
                self.state = SessionState::Playing;
                info!("episode started ({})", self.difficulty.label());
            }

            (Command::RestartToMenu, SessionState::GameOver) => {
                self.reset_episode();
                self.state = SessionState::Menu;
            }

            _ => {}
        }
        false
    }

    /// Advance the episode by one step. Does nothing unless playing.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        if self.state != SessionState::Playing {
            return TickResult::idle(self.state);
        }

        let elapsed = self.elapsed(now);
        if elapsed >= self.cfg.time_limit {
            return self.finish(elapsed, EndReason::TimeUp);
        }

        // The AI looks at the board as it stands before anyone moves.
        let obstacles = self.obstacles();
        let situation = Situation {
            grid: &self.grid,
            snake: &self.ai,
            fruit: self.fruit.position,
            obstacles: &obstacles,
            tuning: self.cfg.ai,
        };
        let ai_dir = ai::decide(self.difficulty, &situation, &mut self.rng);
        trace!(
            "ai at {:?} heading {:?} picks {:?} (fruit {:?})",
            self.ai.head(),
            self.ai.heading(),
            ai_dir,
            self.fruit.position
        );

        if let Some(dir) = self.pending_dir.take() {
            self.player.change_heading(dir);
        }
        self.ai.change_heading(ai_dir);

        // Snakes may overlap each other; only walls and own bodies kill.
        let player_ok = self.player.advance(&self.grid);
        let ai_ok = self.ai.advance(&self.grid);
        if !player_ok || !ai_ok {
            let reason = EndReason::Crash {
                player: !player_ok,
                ai: !ai_ok,
            };
            return self.finish(elapsed, reason);
        }

        let player_ate = self.try_eat(Role::Player, elapsed);
        let ai_ate = self.try_eat(Role::Ai, elapsed);
        let special_spawned = self.run_fruit_schedule(elapsed);

        TickResult {
            state: self.state,
            player_ate,
            ai_ate,
            special_spawned,
            end: None,
        }
    }

    fn reset_episode(&mut self) {
        self.player = Snake::new(Role::Player, self.cfg.player_start(), Direction::Right);
        self.ai = Snake::new(Role::Ai, self.cfg.ai_start(), Direction::Left);
        self.pending_dir = None;
        self.clock = None;
        self.special_fired = [false; 3];
        self.end = None;
        self.fruit = self.spawn_fruit(ORDINARY_POINTS, Duration::ZERO);
    }

    fn finish(&mut self, elapsed: Duration, reason: EndReason) -> TickResult {
        if let Some(clock) = self.clock.as_mut() {
            clock.freeze(elapsed);
        }
        self.state = SessionState::GameOver;
        self.end = Some(reason);
        self.pending_dir = None;
        info!(
            "episode over after {:?}: {:?}, player {} ai {}",
            elapsed,
            reason,
            self.player.score(),
            self.ai.score()
        );

        TickResult {
            end: Some(reason),
            ..TickResult::idle(self.state)
        }
    }

    fn snake_mut(&mut self, role: Role) -> &mut Snake {
        match role {
            Role::Player => &mut self.player,
            Role::Ai => &mut self.ai,
        }
    }

    fn try_eat(&mut self, role: Role, elapsed: Duration) -> bool {
        let fruit = self.fruit;
        let snake = self.snake_mut(role);
        if snake.head() != fruit.position {
            return false;
        }
        snake.grow();
        snake.add_score(fruit.points);
        debug!("{role:?} ate {} point(s) at {:?}", fruit.points, fruit.position);

        // Only the position moves; a special fruit keeps its value.
        self.fruit = self.spawn_fruit(fruit.points, elapsed);
        true
    }

    /// Special fruit at each mark, once; otherwise move a stale fruit.
    fn run_fruit_schedule(&mut self, elapsed: Duration) -> Option<u32> {
        let due = SPECIAL_FRUITS
            .iter()
            .zip(self.special_fired)
            .position(|(special, fired)| !fired && elapsed >= special.at);

        if let Some(idx) = due {
            let special = SPECIAL_FRUITS[idx];
            self.special_fired[idx] = true;
            self.fruit = self.spawn_fruit(special.points, elapsed);
            debug!(
                "special fruit worth {} at {:?}",
                special.points, self.fruit.position
            );
            return Some(special.points);
        }

        if elapsed.saturating_sub(self.fruit.spawned_at) >= self.cfg.respawn_interval {
            self.fruit = self.spawn_fruit(ORDINARY_POINTS, elapsed);
            debug!("fruit moved to {:?}", self.fruit.position);
        }
        None
    }

    fn spawn_fruit(&mut self, points: u32, at: Duration) -> Fruit {
        let occupied = self.occupied();
        Fruit::spawn(
            &self.grid,
            &occupied,
            self.cfg.spawn_attempts,
            points,
            at,
            &mut self.rng,
        )
    }

    fn occupied(&self) -> HashSet<Point> {
        self.player
            .segments()
            .chain(self.ai.segments())
            .copied()
            .collect()
    }

    /// Cells the AI must route around: everything but its own head.
    fn obstacles(&self) -> HashSet<Point> {
        self.player
            .segments()
            .chain(self.ai.segments().skip(1))
            .copied()
            .collect()
    }
}
