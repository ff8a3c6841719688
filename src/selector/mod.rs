//! Move selection pipeline: validate, encode, score, filter, argmax.

use crate::core::{Board, BoardError, Move, PlayerId};
use crate::logic::{legal_columns, select_column};
use crate::scoring::{Scorer, ScoringUnavailable};

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("malformed board: {0}")]
    MalformedBoard(#[from] BoardError),
    #[error(transparent)]
    ScoringUnavailable(#[from] ScoringUnavailable),
    #[error("no legal move")]
    NoLegalMove,
}

/// Chooses a column for a raw board. Holds no per-game state, so one
/// instance can serve any number of concurrent requests.
pub struct MoveSelector<S> {
    scorer: S,
}

impl<S: Scorer> MoveSelector<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Wire-level entry point. Every failure collapses to [`Move::NONE`].
    pub async fn select_move(&self, raw_board: &[i64], raw_player: i64) -> Move {
        match self.try_select(raw_board, raw_player).await {
            Ok(col) => Move::at(col).unwrap_or(Move::NONE),
            Err(SelectError::NoLegalMove) => {
                tracing::info!(player = raw_player, "board is full, no legal move");
                Move::NONE
            }
            Err(e @ SelectError::MalformedBoard(_)) => {
                tracing::warn!(player = raw_player, error = %e, "rejected move request");
                Move::NONE
            }
            Err(e @ SelectError::ScoringUnavailable(_)) => {
                tracing::error!(
                    player = raw_player,
                    scorer = self.scorer.name(),
                    error = %e,
                    "scoring unavailable"
                );
                Move::NONE
            }
        }
    }

    /// Validates the raw input, then runs [`MoveSelector::choose`].
    pub async fn try_select(
        &self,
        raw_board: &[i64],
        raw_player: i64,
    ) -> Result<usize, SelectError> {
        let board = Board::from_wire(raw_board)?;
        let player = PlayerId::from_wire(raw_player).ok_or(BoardError::InvalidPlayer(raw_player))?;
        self.choose(&board, player).await
    }

    pub async fn choose(&self, board: &Board, player: PlayerId) -> Result<usize, SelectError> {
        let legal = legal_columns(board);
        if legal.is_empty() {
            return Err(SelectError::NoLegalMove);
        }

        let encoded = board.encode_for_api();
        let scores = self.scorer.fetch_scores(&encoded, player).await?;
        tracing::debug!(?legal, ?scores, "received scores");

        select_column(&legal, &scores).ok_or(SelectError::NoLegalMove)
    }
}
