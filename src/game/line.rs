//! Four-in-a-row detection around a freshly placed token.

use super::board::{Board, Cell, COLS, ROWS};

pub const WIN_LENGTH: usize = 4;

/// The four directions a line can run in, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right, `\`
    DiagonalDown,
    /// Bottom-left to top-right, `/`
    DiagonalUp,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDown,
        Axis::DiagonalUp,
    ];

    /// (row delta, col delta) pointing at the end a line is reported from:
    /// the left end, or the bottom end for vertical lines.
    fn toward_start(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, -1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalDown => (-1, -1),
            Axis::DiagonalUp => (1, -1),
        }
    }
}

/// A winning run of same-colored cells, ordered left to right (bottom to top
/// for vertical runs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    axis: Axis,
    cells: Vec<(usize, usize)>,
}

impl Line {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// (row, col) pairs
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Check whether the token at (row, col) completes a line. Axes are tried in
/// [`Axis::ALL`] order and the first one of length >= 4 wins. An empty cell
/// never forms a line.
pub fn detect_line(board: &Board, row: usize, col: usize) -> Option<Line> {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return None;
    }

    Axis::ALL.into_iter().find_map(|axis| {
        let cells = run_through(board, row, col, cell, axis);
        (cells.len() >= WIN_LENGTH).then_some(Line { axis, cells })
    })
}

/// All contiguous `cell`-valued coordinates through (row, col) along `axis`.
fn run_through(
    board: &Board,
    row: usize,
    col: usize,
    cell: Cell,
    axis: Axis,
) -> Vec<(usize, usize)> {
    let (dr, dc) = axis.toward_start();

    let mut cells = walk(board, row, col, cell, (dr, dc));
    cells.reverse();
    cells.push((row, col));
    cells.extend(walk(board, row, col, cell, (-dr, -dc)));
    cells
}

/// Step away from (row, col) while the cells keep matching, excluding the
/// origin.
fn walk(
    board: &Board,
    row: usize,
    col: usize,
    cell: Cell,
    (dr, dc): (isize, isize),
) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;

    while (0..ROWS as isize).contains(&r)
        && (0..COLS as isize).contains(&c)
        && board.get(r as usize, c as usize) == cell
    {
        cells.push((r as usize, c as usize));
        r += dr;
        c += dc;
    }
    cells
}
