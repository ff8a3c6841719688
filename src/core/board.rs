use super::types::Cell;
#[cfg(test)]
use super::types::PlayerId;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;
pub const CELLS: usize = ROWS * COLUMNS;
/// 最上段 (row 5) のインデックス
pub const TOP_ROW: usize = ROWS - 1;

pub type Grid = [[Cell; COLUMNS]; ROWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has {0} cells, expected {CELLS}")]
    WrongLength(usize),
    #[error("cell {index} holds {value}, expected 0, 1 or 2")]
    InvalidCell { index: usize, value: i64 },
    #[error("player {0} is not 1 or 2")]
    InvalidPlayer(i64),
}

/// 盤面
///
/// Flat storage, bottom row first: cell (row, col) lives at `row * COLUMNS + col`,
/// row 0 is the physical bottom and row 5 the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Validates a raw wire board (values 0, 1, 2).
    pub fn from_wire(raw: &[i64]) -> Result<Self, BoardError> {
        if raw.len() != CELLS {
            return Err(BoardError::WrongLength(raw.len()));
        }
        let mut board = Board::new();
        for (index, &value) in raw.iter().enumerate() {
            board.cells[index] =
                Cell::from_wire(value).ok_or(BoardError::InvalidCell { index, value })?;
        }
        Ok(board)
    }

    pub fn to_wire(&self) -> Vec<i64> {
        self.cells.iter().map(|c| i64::from(c.as_wire())).collect()
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * COLUMNS + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * COLUMNS + col] = cell;
    }

    /// Reinterprets the flat cells as a 6x7 grid, `grid[r][c] == flat[r * 7 + c]`.
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[Cell::Empty; COLUMNS]; ROWS];
        for (r, row) in grid.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * COLUMNS..(r + 1) * COLUMNS]);
        }
        grid
    }

    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Board::new();
        for (r, row) in grid.iter().enumerate() {
            board.cells[r * COLUMNS..(r + 1) * COLUMNS].copy_from_slice(row);
        }
        board
    }

    /// Scoring API encoding: top row first, left to right, one digit per cell.
    pub fn encode_for_api(&self) -> String {
        let grid = self.to_grid();
        let mut out = String::with_capacity(CELLS);
        for row in grid.iter().rev() {
            for cell in row {
                out.push(char::from(b'0' + cell.as_wire()));
            }
        }
        out
    }
}

#[cfg(test)]
impl Board {
    /// 列の最下段の空きマスに駒を落とす。満杯なら false。
    pub fn drop_piece(&mut self, col: usize, player: PlayerId) -> bool {
        match (0..ROWS).find(|&row| self.get(row, col).is_empty()) {
            Some(row) => {
                self.set(row, col, Cell::Occupied(player));
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}
