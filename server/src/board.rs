use crate::seat::Seat;

/// Line directions scanned for a win as (row step, column step):
/// horizontal, vertical, rising diagonal, falling diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Piece(Seat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    InvalidColumn,
    ColumnFull,
}

/// Fixed-size grid stored row-major, row 0 at the bottom.
///
/// Alongside the cells the board keeps, per column, the lowest empty row, and
/// a count of columns that have been filled, so that both "where does the
/// next piece land" and "is the board full" are constant time. A cell is
/// written at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    lowest_empty: Vec<usize>,
    full_columns: usize,
}

impl Board {
    /// Create an empty board
    ///
    /// Dimensions are not checked here; games size their board through
    /// [`crate::game::validate_setup`].
    pub fn new(rows: usize, columns: usize) -> Self {
        Board {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
            lowest_empty: vec![0; columns],
            full_columns: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Get the cell at a position, or `None` when it lies outside the board
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.columns {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    /// Number of pieces already stacked in a column
    pub fn column_height(&self, column: usize) -> Option<usize> {
        self.lowest_empty.get(column).copied()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        match self.column_height(column) {
            Some(height) => height == self.rows,
            None => true,
        }
    }

    pub fn full_columns(&self) -> usize {
        self.full_columns
    }

    pub fn is_full(&self) -> bool {
        self.full_columns == self.columns
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, column: usize, seat: Seat) -> Result<usize, DropError> {
        if column >= self.columns {
            return Err(DropError::InvalidColumn);
        }

        let row = self.lowest_empty[column];
        if row == self.rows {
            return Err(DropError::ColumnFull);
        }

        let index = row * self.columns + column;
        debug_assert_eq!(self.cells[index], Cell::Empty);
        self.cells[index] = Cell::Piece(seat);

        self.lowest_empty[column] = row + 1;
        if row + 1 == self.rows {
            self.full_columns += 1;
        }

        Ok(row)
    }

    /// Check whether the piece at (row, column) completes a line of
    /// `win_length` pieces owned by `seat`.
    ///
    /// Each direction is scanned over a window of `win_length - 1` cells to
    /// either side of the placed piece. A line longer than both dimensions
    /// never fits, so no scan happens.
    pub fn has_line_through(&self, row: usize, column: usize, seat: Seat, win_length: usize) -> bool {
        if win_length == 0 || win_length > self.rows.max(self.columns) {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&(row_step, column_step)| {
                self.scan_window(row, column, row_step, column_step, seat, win_length)
            })
    }

    fn scan_window(
        &self,
        row: usize,
        column: usize,
        row_step: isize,
        column_step: isize,
        seat: Seat,
        win_length: usize,
    ) -> bool {
        let stretch = (win_length - 1) as isize;
        let mut r = row as isize - stretch * row_step;
        let mut c = column as isize - stretch * column_step;
        let mut run = 0;

        for _ in 0..(2 * stretch + 1) {
            match self.cell_at(r, c) {
                Some(Cell::Piece(owner)) if owner == seat => {
                    run += 1;
                    if run == win_length {
                        return true;
                    }
                }
                _ => run = 0,
            }

            r += row_step;
            c += column_step;
        }

        false
    }

    fn cell_at(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        self.get(row as usize, column as usize)
    }
}
