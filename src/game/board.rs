use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of contiguous same-mark cells needed to win.
pub const CONNECT: usize = 4;

/// Scan directions as (row step, col step): horizontal, vertical,
/// diagonal ↘ and diagonal ↙.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    ColumnFull,
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Row where a disc dropped into `col` would land, or `None` if the
    /// column is full or out of range.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Number of discs stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS).filter(|&row| !self.cells[row][col].is_empty()).count()
    }

    /// Total number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, DropError> {
        if col >= COLS {
            return Err(DropError::InvalidColumn);
        }

        let row = self.lowest_empty_row(col).ok_or(DropError::ColumnFull)?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Empty a single cell. Only the engine's undo uses this, always on the
    /// topmost disc of a column.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Check if the board is completely full.
    ///
    /// Gravity keeps every column contiguous from the bottom, so the board is
    /// full exactly when the top row is.
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|cell| !cell.is_empty())
    }

    /// Check if the last move at (row, col) resulted in a win.
    ///
    /// Each axis is scanned along the full line through the placed disc,
    /// counting runs of the mover's mark.
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        AXES.iter()
            .any(|&step| self.line_has_run(row, col, step, cell))
    }

    fn line_has_run(&self, row: usize, col: usize, (dr, dc): (isize, isize), cell: Cell) -> bool {
        // Walk back to where the line enters the board
        let (mut r, mut c) = (row as isize, col as isize);
        while in_bounds(r - dr, c - dc) {
            r -= dr;
            c -= dc;
        }

        let mut run = 0;
        while in_bounds(r, c) {
            if self.cells[r as usize][c as usize] == cell {
                run += 1;
                if run >= CONNECT {
                    return true;
                }
            } else {
                run = 0;
            }
            r += dr;
            c += dc;
        }

        false
    }

    /// Find four contiguous cells of the mark at (row, col), for highlighting
    /// a win.
    ///
    /// Axes are tried horizontal, vertical, ↘, ↙; within an axis, windows
    /// start at most three cells away from the move. The first qualifying
    /// window is returned, which need not be the only one.
    pub fn winning_cells(&self, row: usize, col: usize) -> Option<[(usize, usize); CONNECT]> {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return None;
        }

        let span = CONNECT - 1;
        let rows = row.saturating_sub(span)..=row.min(ROWS - CONNECT);
        let cols = col.saturating_sub(span)..=col.min(COLS - CONNECT);

        cols.clone()
            .find_map(|c| self.window(row, c, AXES[0], cell))
            .or_else(|| {
                rows.clone()
                    .find_map(|r| self.window(r, col, AXES[1], cell))
            })
            .or_else(|| {
                rows.clone().find_map(|r| {
                    cols.clone()
                        .find_map(|c| self.window(r, c, AXES[2], cell))
                })
            })
            .or_else(|| {
                rows.clone().find_map(|r| {
                    (col.max(span)..=(col + span).min(COLS - 1))
                        .rev()
                        .find_map(|c| self.window(r, c, AXES[3], cell))
                })
            })
    }

    fn window(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        cell: Cell,
    ) -> Option<[(usize, usize); CONNECT]> {
        let mut coords = [(0, 0); CONNECT];
        for (i, slot) in coords.iter_mut().enumerate() {
            let r = row as isize + dr * i as isize;
            let c = col as isize + dc * i as isize;
            if !in_bounds(r, c) || self.cells[r as usize][c as usize] != cell {
                return None;
            }
            *slot = (r as usize, c as usize);
        }
        Some(coords)
    }
}

fn in_bounds(row: isize, col: isize) -> bool {
    (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col)
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
