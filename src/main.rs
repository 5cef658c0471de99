use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, debug, info};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Stylize,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use simplelog::{Config, WriteLogger};

use duel_snake::input::command_for;
use duel_snake::render::{board_lines, board_to_str, footer_lines, menu_lines, status_line};
use duel_snake::{Command, Difficulty, GameConfig, GameSession, SessionState, Snapshot};

#[derive(Parser)]
#[command(name = "duel-snake")]
#[command(version, about = "Race an AI snake for fruit in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 30)]
    height: i32,

    /// Initial AI difficulty (can be changed in the menu)
    #[arg(long, value_enum, default_value_t = Level::Normal)]
    difficulty: Level,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Fixed RNG seed for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Verbosity::Info)]
    log_level: Verbosity,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Normal,
    Hard,
}

#[derive(Clone, Copy, ValueEnum)]
enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Verbosity> for LevelFilter {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Normal => Difficulty::Normal,
            Level::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    if let Some(path) = &cli.log {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level.into(), Config::default(), file)
            .context("Failed to initialize logger")?;
    }

    let cfg = GameConfig::new(cli.width, cli.height);
    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(cfg, seed),
        None => GameSession::new(cfg),
    }
    .context("Invalid game configuration")?;
    session.handle(Command::SelectDifficulty(cli.difficulty.into()), Instant::now());
    info!("starting duel-snake on a {}x{} grid", cli.width, cli.height);

    // --- Init terminal ---
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let tick_rate = Duration::from_millis(cli.tick_ms.max(1));
    let res = run(&mut terminal, &mut session, tick_rate);

    // --- Restore terminal even on error ---
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor()?;

    res
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // --- Input (non-blocking) ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = command_for(key) {
                        if session.handle(cmd, Instant::now()) {
                            info!("quit requested");
                            return Ok(());
                        }
                    }
                }
            }
        }

        // --- Tick ---
        if last_tick.elapsed() >= tick_rate {
            let now = Instant::now();
            if let Some(reason) = session.tick(now).end {
                let snap = session.snapshot(now);
                debug!("episode over ({reason:?}):\n{}", board_to_str(&snap));
            }
            last_tick = Instant::now();
        }

        // --- Render ---
        let snap = session.snapshot(Instant::now());
        terminal.draw(|f| draw(f, &snap))?;
    }
}

/// Centers a `w` x `h` frame within `area`.
fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let x = area.x.saturating_add(area.width.saturating_sub(w) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w.min(area.width), h.min(area.height))
}

fn draw(f: &mut Frame, snap: &Snapshot<'_>) {
    let area = f.area();

    if snap.state == SessionState::Menu {
        let lines = menu_lines(snap.difficulty);
        let outer_h = (lines.len() as u16).saturating_add(2);
        let para = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(para, centered(area, 44, outer_h));
        return;
    }

    let mut lines = board_lines(snap);
    lines.push(Line::from(""));
    lines.extend(footer_lines(snap));

    // Two columns per cell, plus the border.
    let outer_w = (snap.grid.width() as u16).saturating_mul(2).saturating_add(2);
    let outer_h = (lines.len() as u16).saturating_add(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(status_line(snap).bold());
    let para = Paragraph::new(lines).block(block).alignment(Alignment::Left);

    f.render_widget(para, centered(area, outer_w, outer_h));
}
