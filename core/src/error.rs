use core::fmt;

use crate::grid::Position;

/// Errors raised by grid construction and wall carving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were zero (or the cell count overflowed)
    InvalidDimensions { rows: usize, cols: usize },

    /// Two cells that do not share a wall were asked to share a passage.
    /// Only a bug in the caller can produce this.
    NotAdjacent { a: Position, b: Position },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid maze dimensions {}x{}: both must be at least 1", rows, cols)
            }
            GridError::NotAdjacent { a, b } => {
                write!(f, "cells {} and {} are not adjacent", a, b)
            }
        }
    }
}

impl core::error::Error for GridError {}

/// A numeric move outside the range 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub u8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction {}: must be 0 (north), 1 (east), 2 (south) or 3 (west)", self.0)
    }
}

impl core::error::Error for InvalidDirection {}

/// A direction name that is not one of north/east/south/west (or up/right/down/left)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDirectionError;

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown direction name")
    }
}

impl core::error::Error for ParseDirectionError {}
