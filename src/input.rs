use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ai::Difficulty;
use crate::grid::Direction;
use crate::session::Command;

/// Maps a key press to a session command. The session decides whether the
/// command means anything in its current state.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let cmd = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,

        // Vim movement (k/j/h/l) → Up/Down/Left/Right
        KeyCode::Char('k') | KeyCode::Up => Command::SetPlayerDirection(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => Command::SetPlayerDirection(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => Command::SetPlayerDirection(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => Command::SetPlayerDirection(Direction::Right),

        KeyCode::Char(' ') => Command::TogglePause,

        KeyCode::Char('1') => Command::SelectDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => Command::SelectDifficulty(Difficulty::Normal),
        KeyCode::Char('3') => Command::SelectDifficulty(Difficulty::Hard),

        KeyCode::Enter => Command::StartEpisode,
        KeyCode::Char('r') | KeyCode::Char('c') => Command::RestartToMenu,

        _ => return None,
    };
    Some(cmd)
}
