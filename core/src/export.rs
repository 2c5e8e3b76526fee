//! Binary grid representation of a maze
//!
//! Creates a grid where:
//! - 0 = wall
//! - 1 = path (walkable cell or open passage)
//!
//! For a maze with R rows and C columns:
//! - Grid size is (R*2 + 1) x (C*2 + 1)
//! - Cell centers are at (row*2+1, col*2+1)
//! - The slot between two centers is a path when the wall between them is open

use alloc::vec;
use alloc::vec::Vec;

use crate::grid::Grid;

pub const WALL: u8 = 0;
pub const PATH: u8 = 1;

/// Dimensions (height, width) of the binary grid for a rows x cols maze
pub fn binary_dimensions(rows: usize, cols: usize) -> (usize, usize) {
    (rows * 2 + 1, cols * 2 + 1)
}

pub fn to_binary_grid(grid: &Grid) -> Vec<Vec<u8>> {
    let (height, width) = binary_dimensions(grid.rows(), grid.cols());
    let mut out = vec![vec![WALL; width]; height];

    for (pos, cell) in grid.cells() {
        let gr = pos.row * 2 + 1;
        let gc = pos.col * 2 + 1;

        out[gr][gc] = PATH;

        // Edge walls are never opened, so these stay inside the border
        if !cell.walls.top {
            out[gr - 1][gc] = PATH;
        }
        if !cell.walls.bottom {
            out[gr + 1][gc] = PATH;
        }
        if !cell.walls.right {
            out[gr][gc + 1] = PATH;
        }
        if !cell.walls.left {
            out[gr][gc - 1] = PATH;
        }
    }

    out
}
