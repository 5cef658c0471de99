use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};

use crate::ai::Difficulty;
use crate::grid::Point;
use crate::session::{EndReason, SessionState, Snapshot, Verdict};
use crate::snake::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Fruit(u32),
    Snake(Role),
}

/// Board as rows of cells. Snakes cover the fruit; the AI covers the player.
pub fn cell_rows(snap: &Snapshot<'_>) -> Vec<Vec<Cell>> {
    let (w, h) = (snap.grid.width(), snap.grid.height());
    let mut rows = vec![vec![Cell::Empty; w as usize]; h as usize];
    let mut put = |p: Point, cell: Cell| {
        if snap.grid.in_bounds(p) {
            rows[p.y as usize][p.x as usize] = cell;
        }
    };

    put(snap.fruit.position, Cell::Fruit(snap.fruit.points));
    for snake in [snap.player, snap.ai] {
        for &p in snake.segments() {
            put(p, Cell::Snake(snake.role()));
        }
    }
    rows
}

/// Print board in simple ascii
pub fn board_to_str(snap: &Snapshot<'_>) -> String {
    cell_rows(snap)
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Fruit(_) => '*',
                    Cell::Snake(Role::Player) => 'P',
                    Cell::Snake(Role::Ai) => 'A',
                })
                .collect::<String>()
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn fruit_color(points: u32) -> Color {
    match points {
        0..=1 => Color::Yellow,
        2..=3 => Color::LightGreen,
        4..=5 => Color::LightMagenta,
        _ => Color::LightRed,
    }
}

fn snake_color(role: Role) -> Color {
    match role {
        Role::Player => Color::LightBlue,
        Role::Ai => Color::DarkGray,
    }
}

/// Board as styled lines, two terminal columns per cell so cells come out
/// roughly square.
pub fn board_lines(snap: &Snapshot<'_>) -> Vec<Line<'static>> {
    cell_rows(snap)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|cell| match cell {
                    Cell::Empty => Span::styled(
                        "· ",
                        Style::new().fg(Color::Gray).add_modifier(Modifier::DIM),
                    ),
                    Cell::Fruit(points) => Span::styled(
                        "()",
                        Style::new()
                            .fg(fruit_color(points))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::Snake(role) => Span::styled("██", Style::new().fg(snake_color(role))),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn status_line(snap: &Snapshot<'_>) -> String {
    let marks: String = snap
        .specials
        .iter()
        .map(|m| if m.fired { '◆' } else { '◇' })
        .collect();
    format!(
        " player: {}  ai: {}  •  {}s left  •  {}  •  {} ",
        snap.player.score(),
        snap.ai.score(),
        snap.remaining_secs,
        snap.difficulty.label(),
        marks,
    )
}

pub fn verdict_text(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::PlayerWins => "You win!",
        Verdict::AiWins => "The AI wins!",
        Verdict::Draw => "Draw!",
    }
}

/// Lines shown under the board, depending on the session state.
pub fn footer_lines(snap: &Snapshot<'_>) -> Vec<Line<'static>> {
    match snap.state {
        SessionState::Paused => vec![Line::from("paused (space to resume)".bold())],
        SessionState::GameOver => {
            let cause = match snap.end {
                Some(EndReason::TimeUp) => "time is up",
                Some(EndReason::Crash { player: true, ai: true }) => "both snakes crashed",
                Some(EndReason::Crash { player: true, .. }) => "you crashed",
                Some(EndReason::Crash { .. }) => "the AI crashed",
                None => "",
            };
            let verdict = snap.verdict.map_or("", verdict_text);
            vec![
                Line::styled(
                    format!("{verdict} ({cause})"),
                    Style::new().add_modifier(Modifier::BOLD),
                ),
                Line::from(format!(
                    "final score: player {}  ai {}",
                    snap.player.score(),
                    snap.ai.score()
                )),
                Line::from("c: continue  •  q: quit"),
            ]
        }
        _ => vec![Line::from("arrows / hjkl steer  •  space pauses  •  q quits".dim())],
    }
}

pub fn menu_lines(selected: Difficulty) -> Vec<Line<'static>> {
    let option = |key: char, d: Difficulty| {
        let text = format!(" {key}: {} ", d.label());
        if d == selected {
            Span::styled(text, Style::new().fg(Color::Black).bg(Color::LightBlue))
        } else {
            Span::raw(text)
        }
    };
    vec![
        Line::from("Snake Duel".bold()),
        Line::from(""),
        Line::from("Choose AI difficulty:"),
        Line::from(vec![
            option('1', Difficulty::Easy),
            Span::raw("  "),
            option('2', Difficulty::Normal),
            Span::raw("  "),
            option('3', Difficulty::Hard),
        ]),
        Line::from(""),
        Line::from("Enter: start  •  q: quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::session::GameSession;
    use std::time::Instant;

    #[test]
    fn ascii_board_marks_both_snakes_and_fruit() {
        let cfg = GameConfig {
            start_inset: 1,
            ..GameConfig::new(6, 3)
        };
        let session = GameSession::with_seed(cfg, 5).unwrap();
        let snap = session.snapshot(Instant::now());
        let board = board_to_str(&snap);

        let rows: Vec<&str> = board.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.chars().count() == 6));
        assert_eq!(rows[1].chars().nth(1), Some('P'));
        assert_eq!(rows[1].chars().nth(4), Some('A'));
        assert_eq!(board.matches('*').count(), 1);
    }

    #[test]
    fn styled_board_has_two_columns_per_cell() {
        let session = GameSession::with_seed(GameConfig::default(), 5).unwrap();
        let snap = session.snapshot(Instant::now());
        let lines = board_lines(&snap);
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.width() == 80));
    }

    #[test]
    fn status_shows_scores_and_time() {
        let session = GameSession::with_seed(GameConfig::default(), 5).unwrap();
        let snap = session.snapshot(Instant::now());
        let status = status_line(&snap);
        assert!(status.contains("player: 0"));
        assert!(status.contains("120s left"));
        assert!(status.contains("normal"));
        assert!(status.contains("◇◇◇"));
    }

    #[test]
    fn fruit_colors_escalate() {
        assert_eq!(fruit_color(1), Color::Yellow);
        assert_eq!(fruit_color(10), Color::LightRed);
    }
}
