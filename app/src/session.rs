//! A single game: animated generation followed by navigation
//!
//! The session owns the grid and the generation state. Each call to
//! [`MazeSession::tick`] advances generation by one step; once the
//! generator reports `Finished` the player appears at (0, 0) and moves
//! start being accepted.

use maze_core::{
    Direction, GenerationState, GenerationSummary, Grid, GridError, MoveOutcome, NavigationState, Navigator,
    Phase, Position, RandomSource, SimpleLCG, StepEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Generating,
    Navigating,
}

pub struct MazeSession<R = SimpleLCG> {
    grid: Grid,
    generation: GenerationState,
    rng: R,
    navigation: Option<NavigationState>,
}

impl MazeSession<SimpleLCG> {
    /// New session whose maze is determined by `seed`
    pub fn new(rows: usize, cols: usize, seed: u32) -> Result<Self, GridError> {
        Self::with_rng(rows, cols, SimpleLCG::new(seed))
    }

    /// Throw the current maze away and generate a new one from `seed` on
    /// the same grid
    pub fn restart(&mut self, seed: u32) {
        tracing::debug!("Restarting {}x{} maze with seed {}", self.grid.rows(), self.grid.cols(), seed);
        self.grid.reset();
        self.rng = SimpleLCG::new(seed);
        self.generation = GenerationState::start(&mut self.grid);
        self.navigation = None;
    }
}

impl<R: RandomSource> MazeSession<R> {
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Result<Self, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        let generation = GenerationState::start(&mut grid);
        Ok(Self {
            grid,
            generation,
            rng,
            navigation: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> SessionPhase {
        if self.navigation.is_some() {
            SessionPhase::Navigating
        } else {
            SessionPhase::Generating
        }
    }

    /// Generation cursor, while generating
    pub fn cursor(&self) -> Option<Position> {
        match self.generation.phase() {
            Phase::Running => Some(self.generation.current()),
            Phase::Done => None,
        }
    }

    /// Player position, once navigating
    pub fn player(&self) -> Option<Position> {
        self.navigation.map(|state| state.player_position)
    }

    pub fn goal(&self) -> Position {
        Position::new(self.grid.rows() - 1, self.grid.cols() - 1)
    }

    pub fn at_goal(&self) -> bool {
        self.player() == Some(self.goal())
    }

    pub fn summary(&self) -> GenerationSummary {
        self.generation.summary()
    }

    /// Advance generation by one step. Once generation is over this keeps
    /// returning `Finished`.
    pub fn tick(&mut self) -> StepEvent {
        let event = self.generation.step(&mut self.grid, &mut self.rng);
        match event {
            StepEvent::Carved { from, to, direction } => {
                tracing::trace!("Carved {} wall of {} into {}", direction, from, to);
            }
            StepEvent::Backtracked { to } => {
                tracing::trace!("Backtracked to {}", to);
            }
            StepEvent::Finished => self.begin_navigation(),
        }
        event
    }

    /// Run whatever is left of generation in one go
    pub fn finish_generation(&mut self) -> GenerationSummary {
        let summary = self.generation.run_to_completion(&mut self.grid, &mut self.rng);
        self.begin_navigation();
        summary
    }

    fn begin_navigation(&mut self) {
        if self.navigation.is_none() {
            let summary = self.generation.summary();
            tracing::debug!(
                "Generation finished after {} steps ({} carves, {} backtracks)",
                summary.steps,
                summary.carves,
                summary.backtracks
            );
            self.navigation = Some(NavigationState::default());
        }
    }

    /// Forward a move from the input layer. Ignored (returns `None`) while
    /// the maze is still being generated.
    pub fn move_player(&mut self, direction: Direction) -> Option<MoveOutcome> {
        let state = self.navigation?;
        let mut navigator = Navigator::resume(&self.grid, state)?;
        let outcome = navigator.move_player(direction);
        self.navigation = Some(navigator.state());

        if let MoveOutcome::Blocked { position, reason } = outcome {
            tracing::debug!("Can't move {} from {}: {:?}", direction, position, reason);
        }
        Some(outcome)
    }
}
