//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player};
use tracing::instrument;

/// The 8 lines that win the game, in fixed enumeration order.
///
/// Rows first, then columns, then the two diagonals. Every scan that needs a
/// tie-break (win detection, the computer's win-now and block rules) takes
/// the first match in this order.
pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks whether `player` holds every cell of some win pattern.
#[instrument(skip(board))]
pub fn check_win(board: &Board, player: Player) -> bool {
    winning_line(board, player).is_some()
}

/// Returns the first complete pattern held by `player`, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, player: Player) -> Option<[usize; 3]> {
    let cells = board.cells_of(player);
    WIN_PATTERNS
        .into_iter()
        .find(|pattern| pattern.iter().all(|&index| cells[index]))
}
