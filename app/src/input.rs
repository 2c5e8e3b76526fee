//! Key mapping for the terminal front-end
//!
//! w/a/s/d (either case) and the arrow keys move, r starts a new maze,
//! q and Esc quit.

use crossterm::event::KeyCode;
use maze_core::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

pub fn direction_for_char(c: char) -> Option<Direction> {
    match c.to_ascii_lowercase() {
        'w' => Some(Direction::North),
        'd' => Some(Direction::East),
        's' => Some(Direction::South),
        'a' => Some(Direction::West),
        _ => None,
    }
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up => Some(Command::Move(Direction::North)),
        KeyCode::Right => Some(Command::Move(Direction::East)),
        KeyCode::Down => Some(Command::Move(Direction::South)),
        KeyCode::Left => Some(Command::Move(Direction::West)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char(c) => direction_for_char(c).map(Command::Move),
        _ => None,
    }
}
