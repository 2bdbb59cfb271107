use std::fmt;

use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    A,
    B,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::A => 'A',
            Cell::B => 'B',
        }
    }
}

/// Where a dropped token came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from text rows, top row first. `A` and `B` are tokens,
    /// anything else is empty. Missing rows and columns stay empty. Tokens
    /// are placed as written, so they may float above empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Board::new();
        for (row, line) in rows.iter().take(ROWS).enumerate() {
            for (col, ch) in line.chars().take(COLS).enumerate() {
                board.cells[row][col] = match ch {
                    'A' | 'a' => Cell::A,
                    'B' | 'b' => Cell::B,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn try_get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        if row >= ROWS || col >= COLS {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Overwrite a cell. Callers resolve the landing row first, so indices are
    /// trusted; out-of-range panics.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_empty_row(col).is_none()
    }

    /// Lowest empty row in `col`, scanning up from the floor. `None` when the
    /// column is full or out of range.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Columns that still accept a token, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Number of occupied cells
    pub fn filled(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
