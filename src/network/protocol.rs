use crate::core::Move;
use serde::{Deserialize, Serialize};

/// Client -> Server: one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// 42 cells, bottom row first, values 0 / 1 / 2
    pub board: Vec<i64>,
    pub player: i64,
}

/// Server -> Client. `column` is -1 when no move can be recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: i8,
}

impl From<Move> for MoveResponse {
    fn from(mv: Move) -> Self {
        MoveResponse {
            column: mv.to_wire(),
        }
    }
}
