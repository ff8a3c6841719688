use crate::core::{Board, COLUMNS, TOP_ROW};
use crate::scoring::ScoreMap;

/// 合法手生成: 最上段が空いている列 (昇順)
pub fn legal_columns(board: &Board) -> Vec<usize> {
    (0..COLUMNS)
        .filter(|&c| board.cells()[c + TOP_ROW * COLUMNS].is_empty())
        .collect()
}

/// Picks the highest scoring column among `legal`.
///
/// A column missing from `scores` counts as negative infinity. Ties go to the
/// lowest column index, so the result is deterministic for any score map.
pub fn select_column(legal: &[usize], scores: &ScoreMap) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &col in legal {
        let score = scores.get(&col).copied().unwrap_or(f64::NEG_INFINITY);
        match best {
            Some((best_col, best_score))
                if score < best_score || (score == best_score && col > best_col) => {}
            _ => best = Some((col, score)),
        }
    }
    best.map(|(col, _)| col)
}
