//! Moving the player through a finished maze
//!
//! A move is allowed when the current cell has no wall on that side and
//! the target cell is inside the grid. Anything else leaves the player
//! where they are; a blocked move is never an error.

use crate::direction::Direction;
use crate::grid::{Grid, Position};

/// Why a move did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BlockReason {
    /// A wall stands on that side of the cell
    Wall,
    /// The move would leave the grid
    Boundary,
}

/// Result of a single move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    Blocked { position: Position, reason: BlockReason },
}

impl MoveOutcome {
    /// Where the player is after the move, whether or not it happened
    pub fn position(self) -> Position {
        match self {
            MoveOutcome::Moved(position) | MoveOutcome::Blocked { position, .. } => position,
        }
    }

    pub fn is_moved(self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Try to move one cell from `position` in `direction`.
///
/// The bounds check applies to all four directions, independent of the
/// wall state. A position outside the grid never moves.
pub fn try_move(grid: &Grid, position: Position, direction: Direction) -> MoveOutcome {
    let Some(cell) = grid.get(position) else {
        return MoveOutcome::Blocked { position, reason: BlockReason::Boundary };
    };
    let Some(target) = grid.neighbor(position, direction) else {
        return MoveOutcome::Blocked { position, reason: BlockReason::Boundary };
    };
    if cell.walls.get(direction) {
        return MoveOutcome::Blocked { position, reason: BlockReason::Wall };
    }
    MoveOutcome::Moved(target)
}

/// Position after trying to move; the unchanged position when blocked
pub fn navigate(grid: &Grid, position: Position, direction: Direction) -> Position {
    try_move(grid, position, direction).position()
}

/// Where the player currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationState {
    pub player_position: Position,
}

/// Outcome of replaying a list of moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplaySummary {
    pub final_position: Position,
    /// Moves consumed, including blocked ones
    pub moves_applied: usize,
    pub blocked: usize,
    pub reached_goal: bool,
}

/// Player navigation over a finished grid
#[derive(Debug, Clone)]
pub struct Navigator<'g> {
    grid: &'g Grid,
    state: NavigationState,
}

impl<'g> Navigator<'g> {
    /// Start at (0, 0)
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            state: NavigationState::default(),
        }
    }

    /// Resume from a saved state. Returns `None` when the position is
    /// outside the grid.
    pub fn resume(grid: &'g Grid, state: NavigationState) -> Option<Self> {
        grid.contains(state.player_position).then_some(Self { grid, state })
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn position(&self) -> Position {
        self.state.player_position
    }

    /// Bottom-right cell
    pub fn goal(&self) -> Position {
        Position::new(self.grid.rows() - 1, self.grid.cols() - 1)
    }

    pub fn at_goal(&self) -> bool {
        self.position() == self.goal()
    }

    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = try_move(self.grid, self.state.player_position, direction);
        self.state.player_position = outcome.position();
        outcome
    }

    /// Apply `moves` in order until they run out or the goal is reached
    pub fn replay<I>(&mut self, moves: I) -> ReplaySummary
    where
        I: IntoIterator<Item = Direction>,
    {
        let mut moves_applied = 0;
        let mut blocked = 0;

        for direction in moves {
            if self.at_goal() {
                break;
            }
            moves_applied += 1;
            if !self.move_player(direction).is_moved() {
                blocked += 1;
            }
        }

        ReplaySummary {
            final_position: self.position(),
            moves_applied,
            blocked,
            reached_goal: self.at_goal(),
        }
    }
}
