pub mod board;
pub mod r#move;
pub mod types;

pub use board::{Board, BoardError, Grid, CELLS, COLUMNS, ROWS, TOP_ROW};
pub use r#move::{Move, NO_MOVE};
pub use types::{Cell, PlayerId};
