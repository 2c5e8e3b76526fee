//! Text rendering of a grid for the terminal
//!
//! Every cell is three characters wide, with `+`, `-` and `|` for
//! corners and walls:
//!
//! ```text
//! +---+---+
//! | @     |
//! +---+   +
//! |     X |
//! +---+---+
//! ```

use maze_core::{Grid, Position};

/// Things drawn on top of the cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    /// Generation cursor
    pub cursor: Option<Position>,
    pub player: Option<Position>,
    pub goal: Option<Position>,
}

const UNVISITED: &str = "###";
const OPEN: &str = "   ";

fn cell_body(grid: &Grid, pos: Position, markers: &Markers) -> &'static str {
    if markers.player == Some(pos) {
        " @ "
    } else if markers.cursor == Some(pos) {
        " * "
    } else if markers.goal == Some(pos) {
        " X "
    } else if grid.cell(pos).visited {
        OPEN
    } else {
        UNVISITED
    }
}

/// Render the whole grid, one line per wall row and cell row, each
/// terminated by `\n`
pub fn render_ascii(grid: &Grid, markers: &Markers) -> String {
    let width = grid.cols() * 4 + 2;
    let mut out = String::with_capacity(width * (grid.rows() * 2 + 1));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            out.push('+');
            let top = grid.cell(Position::new(row, col)).walls.top;
            out.push_str(if top { "---" } else { OPEN });
        }
        out.push_str("+\n");

        for col in 0..grid.cols() {
            let pos = Position::new(row, col);
            out.push(if grid.cell(pos).walls.left { '|' } else { ' ' });
            out.push_str(cell_body(grid, pos, markers));
        }
        let last = grid.cell(Position::new(row, grid.cols() - 1));
        out.push(if last.walls.right { '|' } else { ' ' });
        out.push('\n');
    }

    let bottom = grid.rows() - 1;
    for col in 0..grid.cols() {
        out.push('+');
        let wall = grid.cell(Position::new(bottom, col)).walls.bottom;
        out.push_str(if wall { "---" } else { OPEN });
    }
    out.push_str("+\n");

    out
}
