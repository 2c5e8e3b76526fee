//! Mapping cells onto a drawing surface
//!
//! A renderer draws each cell's standing walls as line segments, fills
//! visited cells, highlights the generation cursor and places the player
//! avatar at a cell center. All coordinates are in surface units (pixels
//! for a canvas) with the origin at the top-left corner.

use crate::grid::{Cell, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A wall drawn as a straight line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Square surface of side `size` divided into rows x cols cells
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub size: f64,
    pub rows: usize,
    pub cols: usize,
}

impl Layout {
    pub fn new(size: f64, rows: usize, cols: usize) -> Self {
        Self { size, rows, cols }
    }

    pub fn cell_width(&self) -> f64 {
        self.size / self.cols as f64
    }

    pub fn cell_height(&self) -> f64 {
        self.size / self.rows as f64
    }

    /// Top-left corner of a cell
    pub fn origin(&self, pos: Position) -> Point {
        Point {
            x: pos.col as f64 * self.cell_width(),
            y: pos.row as f64 * self.cell_height(),
        }
    }

    /// Center of a cell, where the avatar is drawn
    pub fn center(&self, pos: Position) -> Point {
        let origin = self.origin(pos);
        Point {
            x: origin.x + self.cell_width() / 2.0,
            y: origin.y + self.cell_height() / 2.0,
        }
    }

    /// Avatar radius: just inside half the smaller cell side
    pub fn avatar_radius(&self) -> f64 {
        (self.cell_width().min(self.cell_height()) / 2.0 - 2.0).max(0.0)
    }

    /// Box highlighted under the generation cursor
    pub fn highlight(&self, pos: Position) -> Rect {
        self.inset(pos, 1.0, 3.0)
    }

    /// Box filled for a visited cell, leaving room for the wall lines
    pub fn visited_fill(&self, pos: Position) -> Rect {
        self.inset(pos, 1.0, 2.0)
    }

    fn inset(&self, pos: Position, offset: f64, shrink: f64) -> Rect {
        let origin = self.origin(pos);
        Rect {
            x: origin.x + offset,
            y: origin.y + offset,
            width: (self.cell_width() - shrink).max(0.0),
            height: (self.cell_height() - shrink).max(0.0),
        }
    }

    /// Lines for the walls still standing around a cell, in the order
    /// top, left, bottom, right
    pub fn wall_segments(&self, pos: Position, cell: &Cell) -> impl Iterator<Item = Segment> {
        let Point { x, y } = self.origin(pos);
        let (w, h) = (self.cell_width(), self.cell_height());
        let walls = cell.walls;

        let top_left = Point { x, y };
        let top_right = Point { x: x + w, y };
        let bottom_left = Point { x, y: y + h };
        let bottom_right = Point { x: x + w, y: y + h };

        [
            (walls.top, Segment { from: top_left, to: top_right }),
            (walls.left, Segment { from: top_left, to: bottom_left }),
            (walls.bottom, Segment { from: bottom_left, to: bottom_right }),
            (walls.right, Segment { from: top_right, to: bottom_right }),
        ]
        .into_iter()
        .filter_map(|(standing, segment)| standing.then_some(segment))
    }
}
