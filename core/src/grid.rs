//! Grid of cells and their walls
//!
//! Cells are plain data. Everything that needs to know about the
//! surrounding grid (neighbours, bounds, shared walls) is a query on
//! [`Grid`], addressed by [`Position`].

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::direction::Direction;
use crate::error::GridError;

/// A cell address: row from the top, column from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Top-left cell, where generation and navigation both start
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one cell in `direction`, or `None` when that would go below zero.
    /// The upper bound is the grid's business.
    fn offset(self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Wall state of a single cell; `true` means the wall stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    /// All four walls standing
    pub const CLOSED: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.top,
            Direction::East => self.right,
            Direction::South => self.bottom,
            Direction::West => self.left,
        }
    }

    fn open(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.top = false,
            Direction::East => self.right = false,
            Direction::South => self.bottom = false,
            Direction::West => self.left = false,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::CLOSED
    }
}

/// A cell in the maze with walls in four directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub walls: Walls,
    pub visited: bool,
}

/// Rectangular rows x cols matrix of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Allocate a fully walled, unvisited grid.
    ///
    /// # Errors
    /// [`GridError::InvalidDimensions`] when either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0)
            .ok_or(GridError::InvalidDimensions { rows, cols })?;

        Ok(Self {
            cells: vec![Cell::default(); len],
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Cell at `pos`.
    ///
    /// # Panics
    /// When `pos` is outside the grid.
    pub fn cell(&self, pos: Position) -> &Cell {
        assert!(self.contains(pos), "position {} outside {}x{} grid", pos, self.rows, self.cols);
        &self.cells[self.index(pos)]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        assert!(self.contains(pos), "position {} outside {}x{} grid", pos, self.rows, self.cols);
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    pub(crate) fn mark_visited(&mut self, pos: Position) {
        self.cell_mut(pos).visited = true;
    }

    /// Adjacent position in `direction`, or `None` past the edge
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.offset(direction).filter(|&next| self.contains(next))
    }

    /// True when `pos` is in the grid and has no wall facing `direction`
    pub fn is_open(&self, pos: Position, direction: Direction) -> bool {
        self.get(pos).is_some_and(|cell| !cell.walls.get(direction))
    }

    /// Direction from `a` to `b` when they share a wall
    pub fn direction_between(&self, a: Position, b: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.neighbor(a, dir) == Some(b))
    }

    /// Open the passage between two adjacent cells, clearing the wall on
    /// both sides. Returns the direction from `a` to `b`.
    ///
    /// # Errors
    /// [`GridError::NotAdjacent`] when the cells do not share a wall.
    pub fn try_remove_wall_between(&mut self, a: Position, b: Position) -> Result<Direction, GridError> {
        let dir = self
            .direction_between(a, b)
            .ok_or(GridError::NotAdjacent { a, b })?;

        self.cell_mut(a).walls.open(dir);
        self.cell_mut(b).walls.open(dir.opposite());
        Ok(dir)
    }

    /// Like [`Grid::try_remove_wall_between`], for callers that already
    /// know the cells are adjacent.
    ///
    /// # Panics
    /// When the cells are not adjacent; that is a bug in the caller.
    pub fn remove_wall_between(&mut self, a: Position, b: Position) -> Direction {
        match self.try_remove_wall_between(a, b) {
            Ok(dir) => dir,
            Err(e) => panic!("{}", e),
        }
    }

    /// Close every wall and clear every visited flag
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Every cell with its position, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i / cols, i % cols), cell))
    }

    /// Number of open passages between cells. Each passage is counted once
    /// (via the east and south walls), so a finished maze has `len() - 1`.
    pub fn open_passages(&self) -> usize {
        self.cells()
            .map(|(pos, cell)| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&dir| !cell.walls.get(dir) && self.neighbor(pos, dir).is_some())
                    .count()
            })
            .sum()
    }

    pub fn all_visited(&self) -> bool {
        self.cells.iter().all(|cell| cell.visited)
    }

    /// True when every shared wall agrees on both sides
    pub fn walls_symmetric(&self) -> bool {
        self.cells().all(|(pos, cell)| {
            Direction::ALL.into_iter().all(|dir| match self.neighbor(pos, dir) {
                Some(next) => cell.walls.get(dir) == self.cell(next).walls.get(dir.opposite()),
                None => true,
            })
        })
    }
}
