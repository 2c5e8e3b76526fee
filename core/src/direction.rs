//! Cardinal directions shared by walls, neighbour lookups and moves
//!
//! Numeric encoding (used for move lists on the wire):
//! 0 = NORTH, 1 = EAST, 2 = SOUTH, 3 = WEST

use core::fmt;

use crate::error::{InvalidDirection, ParseDirectionError};

/// One of the four grid directions.
///
/// North is the top wall / "up", East the right wall, South the bottom
/// wall / "down", West the left wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in wire-encoding order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Order in which the generator lists candidate neighbours
    /// (top, right, left, bottom). Together with the random source this
    /// fixes the maze shape for a given seed.
    pub const CARVE_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::South,
    ];

    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Row and column deltas: North = (-1, 0), East = (0, +1), ...
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Wire encoding of this direction
    pub fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

impl core::str::FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" | "up" | "top" => Ok(Direction::North),
            "east" | "right" => Ok(Direction::East),
            "south" | "down" | "bottom" => Ok(Direction::South),
            "west" | "left" => Ok(Direction::West),
            _ => Err(ParseDirectionError),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
