//! Maze generation using the Recursive Backtracker algorithm
//!
//! Algorithm: Recursive Backtracker (DFS with an explicit stack)
//! 1. Start at (0, 0), mark as visited
//! 2. On every step:
//!    - Get unvisited neighbours of the current cell
//!    - If neighbours exist: choose one at random, mark it visited, push
//!      the current cell, remove the wall between them, move onto it
//!    - Else if the stack is not empty: backtrack (pop into current)
//!    - Else: generation is done
//!
//! One call to [`GenerationState::step`] performs exactly one of those
//! actions, so callers can run it in a tight loop or one step per frame.
//! The resulting maze only depends on the random sequence, never on pacing.

use alloc::vec::Vec;

use crate::direction::Direction;
use crate::error::GridError;
use crate::export;
use crate::grid::{Grid, Position};
use crate::rng::{RandomSource, SimpleLCG};

/// Generator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    Running,
    Done,
}

/// What a single step did, for animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum StepEvent {
    /// The wall on `from`'s `direction` side fell and the cursor moved to `to`
    Carved {
        from: Position,
        to: Position,
        direction: Direction,
    },
    /// No unvisited neighbour; the cursor went back to `to`
    Backtracked { to: Position },
    /// Generation is complete. Repeated once done.
    Finished,
}

impl StepEvent {
    /// Cursor position after this step, if it moved
    pub fn cursor(&self) -> Option<Position> {
        match *self {
            StepEvent::Carved { to, .. } | StepEvent::Backtracked { to } => Some(to),
            StepEvent::Finished => None,
        }
    }
}

/// Counters for a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSummary {
    pub carves: usize,
    pub backtracks: usize,
    /// All steps taken, including the final one that reported `Finished`
    pub steps: usize,
}

/// Cursor and backtracking stack of an in-progress generation.
///
/// Owned by the caller and handed the grid on every step, so a partially
/// generated maze can be inspected, paused or abandoned at any point.
#[derive(Debug, Clone)]
pub struct GenerationState {
    current: Position,
    stack: Vec<Position>,
    phase: Phase,
    summary: GenerationSummary,
}

impl GenerationState {
    /// Begin generating on a fresh grid: cursor at (0, 0), which is marked
    /// visited, empty stack.
    pub fn start(grid: &mut Grid) -> Self {
        grid.mark_visited(Position::ORIGIN);
        Self {
            current: Position::ORIGIN,
            stack: Vec::with_capacity(grid.len()),
            phase: Phase::Running,
            summary: GenerationSummary::default(),
        }
    }

    pub fn current(&self) -> Position {
        self.current
    }

    /// Backtracking history, oldest first
    pub fn stack(&self) -> &[Position] {
        &self.stack
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn summary(&self) -> GenerationSummary {
        self.summary
    }

    /// Perform one carve, backtrack or finishing step
    pub fn step<R: RandomSource + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> StepEvent {
        if self.is_done() {
            return StepEvent::Finished;
        }
        self.summary.steps += 1;

        if let Some(next) = choose_unvisited_neighbor(grid, self.current, rng) {
            grid.mark_visited(next);
            self.stack.push(self.current);
            let direction = grid.remove_wall_between(self.current, next);

            let from = self.current;
            self.current = next;
            self.summary.carves += 1;
            StepEvent::Carved { from, to: next, direction }
        } else if let Some(prev) = self.stack.pop() {
            self.current = prev;
            self.summary.backtracks += 1;
            StepEvent::Backtracked { to: prev }
        } else {
            self.phase = Phase::Done;
            StepEvent::Finished
        }
    }

    /// Step until done and return the counters
    pub fn run_to_completion<R: RandomSource + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> GenerationSummary {
        while self.step(grid, rng) != StepEvent::Finished {}
        self.summary
    }
}

/// Pick one of the in-bounds, unvisited neighbours of `at` uniformly.
///
/// Candidates are listed in [`Direction::CARVE_ORDER`]; with a fixed array
/// instead of a Vec, since there are never more than four.
fn choose_unvisited_neighbor<R: RandomSource + ?Sized>(grid: &Grid, at: Position, rng: &mut R) -> Option<Position> {
    let mut candidates = [Position::ORIGIN; 4];
    let mut count = 0;

    for dir in Direction::CARVE_ORDER {
        if let Some(next) = grid.neighbor(at, dir) {
            if !grid.cell(next).visited {
                candidates[count] = next;
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }
    let idx = rng.choice_index(count);
    debug_assert!(idx < count, "random source returned {} for {} candidates", idx, count);
    Some(candidates[..count][idx])
}

/// A finished maze generated from a seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    seed: u32,
    summary: GenerationSummary,
}

impl Maze {
    /// Generate a maze using the recursive backtracker algorithm
    ///
    /// # Arguments
    /// * `rows` - Number of cell rows
    /// * `cols` - Number of cell columns
    /// * `seed` - RNG seed for deterministic generation
    ///
    /// # Returns
    /// A perfect maze: every cell reachable from (0,0) by exactly one path
    pub fn generate(rows: usize, cols: usize, seed: u32) -> Result<Self, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        let mut rng = SimpleLCG::new(seed);
        let summary = GenerationState::start(&mut grid).run_to_completion(&mut grid, &mut rng);

        Ok(Self { grid, seed, summary })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn summary(&self) -> GenerationSummary {
        self.summary
    }

    /// See [`export::to_binary_grid`]
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        export::to_binary_grid(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Walls;
    use crate::rng::FirstCandidate;
    use crate::total_steps;
    use alloc::collections::VecDeque;
    use alloc::vec;

    fn generate_with<R: RandomSource>(rows: usize, cols: usize, rng: &mut R) -> (Grid, GenerationSummary) {
        let mut grid = Grid::new(rows, cols).unwrap();
        let summary = GenerationState::start(&mut grid).run_to_completion(&mut grid, rng);
        (grid, summary)
    }

    /// Number of cells reachable from (0, 0) through open passages
    fn reachable_from_origin(grid: &Grid) -> usize {
        let mut seen = vec![false; grid.len()];
        let mut queue = VecDeque::from([Position::ORIGIN]);
        seen[0] = true;
        let mut count = 0;

        while let Some(pos) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if !grid.is_open(pos, dir) {
                    continue;
                }
                if let Some(next) = grid.neighbor(pos, dir) {
                    let idx = next.row * grid.cols() + next.col;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_start_state() {
        let mut grid = Grid::new(3, 3).unwrap();
        let state = GenerationState::start(&mut grid);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.current(), Position::ORIGIN);
        assert!(state.stack().is_empty());
        assert!(grid.cell(Position::ORIGIN).visited);
        assert!(!grid.cell(Position::new(0, 1)).visited);
    }

    #[test]
    fn test_single_cell_finishes_immediately() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = SimpleLCG::new(42);

        assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Finished);
        assert!(state.is_done());
        assert_eq!(
            state.summary(),
            GenerationSummary { carves: 0, backtracks: 0, steps: 1 }
        );
        assert_eq!(grid.cell(Position::ORIGIN).walls, Walls::CLOSED);
        assert!(grid.all_visited());
    }

    #[test]
    fn test_two_by_two_first_candidate() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = FirstCandidate;

        let events: Vec<StepEvent> = (0..3).map(|_| state.step(&mut grid, &mut rng)).collect();
        assert_eq!(
            events,
            vec![
                StepEvent::Carved {
                    from: Position::new(0, 0),
                    to: Position::new(0, 1),
                    direction: Direction::East,
                },
                StepEvent::Carved {
                    from: Position::new(0, 1),
                    to: Position::new(1, 1),
                    direction: Direction::South,
                },
                StepEvent::Carved {
                    from: Position::new(1, 1),
                    to: Position::new(1, 0),
                    direction: Direction::West,
                },
            ]
        );
        assert!(grid.all_visited());
        assert_eq!(state.summary().carves, 3);
        assert_eq!(state.summary().backtracks, 0);

        let walls = |row, col| grid.cell(Position::new(row, col)).walls;
        assert_eq!(walls(0, 0), Walls { top: true, right: false, bottom: true, left: true });
        assert_eq!(walls(0, 1), Walls { top: true, right: true, bottom: false, left: false });
        assert_eq!(walls(1, 1), Walls { top: false, right: true, bottom: true, left: false });
        assert_eq!(walls(1, 0), Walls { top: true, right: false, bottom: true, left: true });

        // Unwind the stack, then finish
        assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Backtracked { to: Position::new(1, 1) });
        assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Backtracked { to: Position::new(0, 1) });
        assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Backtracked { to: Position::new(0, 0) });
        assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Finished);
        assert_eq!(state.summary().steps, 7);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_finished_is_sticky() {
        let mut grid = Grid::new(3, 2).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = SimpleLCG::new(5);
        let summary = state.run_to_completion(&mut grid, &mut rng);
        let snapshot = grid.clone();

        for _ in 0..3 {
            assert_eq!(state.step(&mut grid, &mut rng), StepEvent::Finished);
        }
        assert_eq!(grid, snapshot);
        assert_eq!(state.summary(), summary);
    }

    #[test]
    fn test_all_cells_visited() {
        for (rows, cols) in [(1, 1), (1, 7), (7, 1), (2, 3), (5, 5), (13, 8)] {
            for seed in [1, 99, 12345, 2918957128] {
                let (grid, _) = generate_with(rows, cols, &mut SimpleLCG::new(seed));
                assert!(grid.all_visited(), "{}x{} seed {} left cells unvisited", rows, cols, seed);
            }
        }
    }

    #[test]
    fn test_spanning_tree() {
        for (rows, cols) in [(1, 1), (1, 9), (4, 4), (6, 11), (20, 20)] {
            for seed in [3, 777, 65536] {
                let (grid, _) = generate_with(rows, cols, &mut SimpleLCG::new(seed));
                assert_eq!(grid.open_passages(), rows * cols - 1);
                assert_eq!(reachable_from_origin(&grid), rows * cols);
                assert!(grid.walls_symmetric());
            }
        }
    }

    #[test]
    fn test_walls_symmetric_after_every_step() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = SimpleLCG::new(31337);

        while state.step(&mut grid, &mut rng) != StepEvent::Finished {
            assert!(grid.walls_symmetric());
        }
    }

    #[test]
    fn test_step_count() {
        for (rows, cols) in [(1, 1), (2, 2), (3, 5), (10, 10)] {
            let (_, summary) = generate_with(rows, cols, &mut SimpleLCG::new(8));
            let cells = rows * cols;
            assert_eq!(summary.carves, cells - 1);
            assert_eq!(summary.backtracks, cells - 1);
            assert_eq!(summary.steps, total_steps(cells));
        }
    }

    #[test]
    fn test_carve_events_match_walls() {
        let mut grid = Grid::new(5, 4).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = SimpleLCG::new(4242);

        loop {
            match state.step(&mut grid, &mut rng) {
                StepEvent::Carved { from, to, direction } => {
                    assert_eq!(grid.neighbor(from, direction), Some(to));
                    assert!(grid.is_open(from, direction));
                    assert!(grid.is_open(to, direction.opposite()));
                    assert_eq!(state.current(), to);
                    assert_eq!(state.stack().last(), Some(&from));
                }
                StepEvent::Backtracked { to } => assert_eq!(state.current(), to),
                StepEvent::Finished => break,
            }
        }
    }

    #[test]
    fn test_pacing_does_not_change_result() {
        let (looped, _) = generate_with(9, 7, &mut SimpleLCG::new(2024));

        // Same seed, stepped one at a time with the grid inspected in between
        let mut grid = Grid::new(9, 7).unwrap();
        let mut state = GenerationState::start(&mut grid);
        let mut rng = SimpleLCG::new(2024);
        let mut frames = 0;
        while !state.is_done() {
            state.step(&mut grid, &mut rng);
            frames += 1;
            assert!(grid.open_passages() <= 9 * 7 - 1);
        }

        assert_eq!(frames, total_steps(9 * 7));
        assert_eq!(grid, looped);
    }

    #[test]
    fn test_maze_determinism() {
        let maze1 = Maze::generate(10, 10, 99999).unwrap();
        let maze2 = Maze::generate(10, 10, 99999).unwrap();

        // Same seed should produce identical mazes
        assert_eq!(maze1, maze2);
        assert_eq!(maze1.seed(), 99999);
    }

    #[test]
    fn test_different_seeds() {
        let maze1 = Maze::generate(10, 10, 11111).unwrap();
        let maze2 = Maze::generate(10, 10, 22222).unwrap();

        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(maze1.grid(), maze2.grid());
    }

    /// Always answers one past the last candidate
    struct PastTheEnd;

    impl RandomSource for PastTheEnd {
        fn choice_index(&mut self, len: usize) -> usize {
            len
        }
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_choice_is_a_bug() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut state = GenerationState::start(&mut grid);
        state.step(&mut grid, &mut PastTheEnd);
    }

    #[test]
    fn test_maze_rejects_empty_grid() {
        assert_eq!(
            Maze::generate(0, 20, 1),
            Err(GridError::InvalidDimensions { rows: 0, cols: 20 })
        );
    }
}
