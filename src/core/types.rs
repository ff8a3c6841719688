use serde::{Deserialize, Serialize};

/// プレイヤーID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // X (wire value 1)
    Player2, // O (wire value 2)
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    /// Wire value sent to the scoring service.
    pub fn as_wire(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    pub fn from_wire(value: i64) -> Option<PlayerId> {
        match value {
            1 => Some(PlayerId::Player1),
            2 => Some(PlayerId::Player2),
            _ => None,
        }
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PlayerId),
}

impl Cell {
    pub fn as_wire(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(p) => p.as_wire(),
        }
    }

    pub fn from_wire(value: i64) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            v => PlayerId::from_wire(v).map(Cell::Occupied),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}
