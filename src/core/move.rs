use super::board::COLUMNS;
use std::fmt;

/// Wire value for "no legal move".
pub const NO_MOVE: i8 = -1;

/// 指し手 (列番号、または推奨なし)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    column: Option<u8>,
}

impl Move {
    pub const NONE: Move = Move { column: None };

    /// `None` unless `col` is a board column.
    pub fn at(col: usize) -> Option<Move> {
        u8::try_from(col)
            .ok()
            .filter(|&c| usize::from(c) < COLUMNS)
            .map(|c| Move { column: Some(c) })
    }

    pub fn column(self) -> Option<usize> {
        self.column.map(usize::from)
    }

    pub fn to_wire(self) -> i8 {
        match self.column {
            // bounded by COLUMNS in `at`
            Some(c) => c as i8,
            None => NO_MOVE,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.column {
            Some(c) => write!(f, "column {}", c),
            None => write!(f, "no legal move"),
        }
    }
}
