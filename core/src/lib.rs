//! Shared types and logic for the perfect-maze game
//!
//! This crate provides the grid/wall data model, the step-driven
//! recursive backtracker generator, and the movement validation used
//! once the maze is finished. Rendering and input are left to callers:
//! they read cells and step events from here and forward moves back in.
//!
//! The crate is no_std (with `alloc`) so it can be embedded in any host,
//! with an optional `serde` feature for front-ends that need JSON.

#![no_std]

extern crate alloc;

pub mod direction;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod navigator;
pub mod rng;

// Re-export commonly used types for convenience
pub use direction::Direction;
pub use error::{GridError, InvalidDirection, ParseDirectionError};
pub use export::to_binary_grid;
pub use generator::{GenerationState, GenerationSummary, Maze, Phase, StepEvent};
pub use grid::{Cell, Grid, Position, Walls};
pub use layout::{Layout, Point, Rect, Segment};
pub use navigator::{navigate, try_move, BlockReason, MoveOutcome, NavigationState, Navigator, ReplaySummary};
pub use rng::{FirstCandidate, RandomSource, SimpleLCG};

/// Default maze dimensions (cells, not including walls)
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;

/// Default side length of the square drawing surface, in pixels
pub const DEFAULT_CANVAS_SIZE: f64 = 1000.0;

/// Number of `step()` calls needed to finish a grid of `cells` cells:
/// one carve per cell but the first, one backtrack per carve, one final step.
/// Zero for an empty count, since no grid has zero cells.
pub const fn total_steps(cells: usize) -> usize {
    (2 * cells).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_steps() {
        assert_eq!(total_steps(1), 1);
        assert_eq!(total_steps(4), 7);
        assert_eq!(total_steps(DEFAULT_ROWS * DEFAULT_COLS), 799);
        assert_eq!(total_steps(0), 0);
    }
}
