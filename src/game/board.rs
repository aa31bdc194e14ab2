use std::fmt;

use crate::error::BoardError;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Column indices of the columns that can still take a piece, ascending.
pub type LegalActions = Vec<usize>;

/// Line directions checked by the win detector as (row step, column step):
/// horizontal, vertical, diagonal `\` and diagonal `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Character used by the text rendering.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Red => '●',
            Cell::Yellow => '○',
        }
    }

    fn parse(ch: char) -> Option<Cell> {
        match ch {
            '.' | ' ' => Some(Cell::Empty),
            'R' | 'r' | '●' => Some(Cell::Red),
            'Y' | 'y' | '○' => Some(Cell::Yellow),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.to_cell()
    }
}

/// Reasons a placement is rejected. A rejected placement never changes state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (0-{max})", max = COLS - 1)]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    OutOfTurn { expected: Player, got: Player },
}

/// The 6×7 grid. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
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

    /// Parse a board from six rows of seven characters, top row first.
    ///
    /// `R`/`●` is Red, `Y`/`○` is Yellow and `.` or a space is empty. Boards
    /// with pieces floating above an empty cell are rejected.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        if rows.len() != ROWS {
            return Err(BoardError::WrongRowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(BoardError::WrongRowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] =
                    Cell::parse(ch).ok_or(BoardError::UnknownCell { row, col, ch })?;
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// The whole grid, for renderers.
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Number of pieces of the given colour on the board.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on, or `None` if the column
    /// is full or out of range.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.lowest_empty_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns that are not full, in ascending order.
    pub fn valid_columns(&self) -> LegalActions {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check whether the piece at (row, col) is part of four in a row of
    /// `cell`. Only the four lines through that cell are scanned.
    pub fn wins_through(&self, row: usize, col: usize, cell: Cell) -> bool {
        if row >= ROWS || col >= COLS || cell == Cell::Empty || self.cells[row][col] != cell {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= 4
        })
    }

    /// Scan the whole board for four in a row of `cell`.
    pub fn has_won(&self, cell: Cell) -> bool {
        if cell == Cell::Empty {
            return false;
        }

        for row in 0..ROWS {
            for col in 0..COLS {
                for &(dr, dc) in &DIRECTIONS {
                    let line = (0..4).all(|i| {
                        let r = row as isize + dr * i;
                        let c = col as isize + dc * i;
                        Self::in_bounds(r, c) && self.cells[r as usize][c as usize] == cell
                    });
                    if line {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Count consecutive `cell` pieces starting next to (row, col) and walking
    /// in direction (dr, dc). The anchor itself is not counted.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while Self::in_bounds(r, c) && self.cells[r as usize][c as usize] == cell {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn in_bounds(row: isize, col: isize) -> bool {
        (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col)
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
            f.write_str("|")?;
            for cell in row {
                write!(f, "{}|", cell.symbol())?;
            }
            writeln!(f)?;
        }
        let labels: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
        write!(f, " {}", labels.join(" "))
    }
}
