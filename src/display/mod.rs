use crate::core::{Board, Cell, PlayerId, COLUMNS, ROWS};
use crossterm::style::Stylize;
use std::fmt::Write;

/// 盤面を文字列に描画 (上段から順に、行番号付き)
///
/// ```text
///   0 1 2 3 4 5 6
/// 5 . . . . . . .
/// ...
/// 0 X O . . . . .
/// ```
pub fn render_board(board: &Board, colored: bool) -> String {
    let mut out = String::new();

    let header: Vec<String> = (0..COLUMNS)
        .map(|c| {
            if colored {
                c.to_string().yellow().to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", header.join(" "));

    let grid = board.to_grid();
    for r in (0..ROWS).rev() {
        let row: Vec<String> = grid[r].iter().map(|&cell| cell_symbol(cell, colored)).collect();
        let _ = writeln!(out, "{} {}", r, row.join(" "));
    }
    out
}

fn cell_symbol(cell: Cell, colored: bool) -> String {
    match (cell, colored) {
        (Cell::Empty, _) => ".".to_string(),
        (Cell::Occupied(PlayerId::Player1), true) => "X".red().to_string(),
        (Cell::Occupied(PlayerId::Player2), true) => "O".blue().to_string(),
        (Cell::Occupied(PlayerId::Player1), false) => "X".to_string(),
        (Cell::Occupied(PlayerId::Player2), false) => "O".to_string(),
    }
}
