use maze_core::{
    Direction, GenerationState, GenerationSummary, Grid, Layout, Maze, MoveOutcome, NavigationState, Navigator, Position,
    ReplaySummary, SimpleLCG, StepEvent, Walls, DEFAULT_CANVAS_SIZE, DEFAULT_COLS, DEFAULT_ROWS,
};
use serde::{Deserialize, Serialize};

pub mod files;
pub mod input;
pub mod render;
pub mod session;

pub use session::{MazeSession, SessionPhase};

/// Largest accepted value for either maze dimension
pub const MAX_DIMENSION: usize = 100;

/// Maximum number of moves accepted in a replay
pub const MAX_MOVES: usize = 10_000;

/// Maze size and drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Side of the square canvas the front-end draws on
    pub canvas_size: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl MazeConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Reject sizes outside `1..=MAX_DIMENSION` and canvases that are not
    /// a positive, finite size
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(format!("Invalid {}: {} (must be between 1 and {})", name, value, MAX_DIMENSION).into());
            }
        }
        if !(self.canvas_size.is_finite() && self.canvas_size > 0.0) {
            return Err(format!("Invalid canvas size: {} (must be positive)", self.canvas_size).into());
        }
        Ok(())
    }

}

/// One cell as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub walls: Walls,
    pub visited: bool,
}

/// Serializable view of a finished maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    /// The seed used to generate this maze
    pub maze_seed: u32,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,

    /// The binary grid data (0=wall, 1=path), (2R+1) x (2C+1)
    pub grid_data: Vec<Vec<u8>>,

    /// Cell the player has to reach
    pub goal: Position,

    /// Where each cell lands on the front-end's canvas
    pub layout: Layout,

    pub summary: GenerationSummary,
}

impl MazeSnapshot {
    pub fn from_maze(maze: &Maze, canvas_size: f64) -> Self {
        let grid = maze.grid();
        Self {
            maze_seed: maze.seed(),
            rows: grid.rows(),
            cols: grid.cols(),
            cells: cell_views(grid),
            grid_data: maze.to_binary_grid(),
            goal: Position::new(grid.rows() - 1, grid.cols() - 1),
            layout: Layout::new(canvas_size, grid.rows(), grid.cols()),
            summary: maze.summary(),
        }
    }
}

pub fn cell_views(grid: &Grid) -> Vec<CellView> {
    grid.cells()
        .map(|(pos, cell)| CellView {
            row: pos.row,
            col: pos.col,
            walls: cell.walls,
            visited: cell.visited,
        })
        .collect()
}

/// Use the given seed, or draw a fresh one
pub fn resolve_seed(seed: Option<u32>) -> u32 {
    seed.unwrap_or_else(rand::random)
}

/// Generate a maze from a seed.
///
/// Generation is deterministic, so the same `(seed, rows, cols)` always
/// yields the same maze. This is what lets the other functions here work
/// from a seed instead of a stored grid.
///
/// # Example
/// ```
/// use maze_app::{generate_maze, MazeConfig};
///
/// let maze = generate_maze(2918957128, &MazeConfig::default()).unwrap();
/// assert_eq!(maze.grid_data.len(), 41);
/// ```
pub fn generate_maze(maze_seed: u32, config: &MazeConfig) -> Result<MazeSnapshot, Box<dyn std::error::Error>> {
    config.validate()?;
    tracing::info!("Generating {}x{} maze for seed {}", config.rows, config.cols, maze_seed);

    let maze = Maze::generate(config.rows, config.cols, maze_seed)?;
    let summary = maze.summary();
    tracing::debug!(
        "Maze generated: {} carves, {} backtracks, {} steps",
        summary.carves,
        summary.backtracks,
        summary.steps
    );

    Ok(MazeSnapshot::from_maze(&maze, config.canvas_size))
}

/// Every step event of a generation, in order, ending with `Finished`.
/// Front-ends replay these to animate the carving.
pub fn generation_events(maze_seed: u32, config: &MazeConfig) -> Result<Vec<StepEvent>, Box<dyn std::error::Error>> {
    config.validate()?;

    let mut grid = Grid::new(config.rows, config.cols)?;
    let mut rng = SimpleLCG::new(maze_seed);
    let mut state = GenerationState::start(&mut grid);
    let mut events = Vec::with_capacity(maze_core::total_steps(grid.len()));

    loop {
        let event = state.step(&mut grid, &mut rng);
        events.push(event);
        if event == StepEvent::Finished {
            break;
        }
    }
    Ok(events)
}

/// Apply a single move in the maze identified by `maze_seed`
pub fn apply_move(
    maze_seed: u32,
    config: &MazeConfig,
    position: Position,
    direction: Direction,
) -> Result<MoveOutcome, Box<dyn std::error::Error>> {
    config.validate()?;
    let maze = Maze::generate(config.rows, config.cols, maze_seed)?;

    let state = NavigationState { player_position: position };
    let mut navigator = Navigator::resume(maze.grid(), state)
        .ok_or_else(|| format!("Position {} is outside the {}x{} maze", position, config.rows, config.cols))?;

    let outcome = navigator.move_player(direction);
    if let MoveOutcome::Blocked { reason, .. } = outcome {
        tracing::debug!("Move {} from {} blocked: {:?}", direction, position, reason);
    }
    Ok(outcome)
}

/// Replay numeric moves (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) from (0, 0)
/// and report whether they reach the bottom-right cell.
///
/// Moves into walls are skipped, not rejected. An out-of-range move value
/// is an error.
pub fn replay_moves(
    maze_seed: u32,
    config: &MazeConfig,
    moves: &[u8],
) -> Result<ReplaySummary, Box<dyn std::error::Error>> {
    config.validate()?;
    if moves.len() > MAX_MOVES {
        return Err(format!("Too many moves: {} (max {})", moves.len(), MAX_MOVES).into());
    }

    let directions = moves
        .iter()
        .map(|&m| Direction::try_from(m))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("Replaying {} moves for maze seed {}", directions.len(), maze_seed);

    let maze = Maze::generate(config.rows, config.cols, maze_seed)?;
    let summary = Navigator::new(maze.grid()).replay(directions);

    tracing::info!(
        "Replay finished at {} (goal reached: {})",
        summary.final_position,
        summary.reached_goal
    );
    Ok(summary)
}
