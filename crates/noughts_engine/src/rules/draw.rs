//! Draw detection and terminal evaluation.

use super::win::check_win;
use crate::game::GameResult;
use crate::types::{Board, Player};
use tracing::instrument;

/// Checks if all 9 slots are occupied.
///
/// This says nothing about winners: a full board can also hold a winning
/// line, so callers check [`check_win`] first. [`evaluate`] does both in the
/// right order.
#[instrument(skip(board))]
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}

/// Classifies the board after `last_mover` placed a mark.
///
/// Only the player who just moved can have completed a line, so the win
/// check looks at them alone. A win takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, last_mover: Player) -> Option<GameResult> {
    if check_win(board, last_mover) {
        Some(GameResult::win_for(last_mover))
    } else if check_draw(board) {
        Some(GameResult::Draw)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(board: &mut Board, moves: &[(Player, usize)]) {
        for &(player, index) in moves {
            board.apply_move(player, index).unwrap();
        }
    }

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!check_draw(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let mut board = Board::new();
        fill(&mut board, &[(Player::Human, 4), (Player::Computer, 0)]);
        assert!(!check_draw(&board));
        assert_eq!(evaluate(&board, Player::Computer), None);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        // X O X / X O O / O X X
        let mut board = Board::new();
        fill(
            &mut board,
            &[
                (Player::Human, 0),
                (Player::Computer, 1),
                (Player::Human, 2),
                (Player::Human, 3),
                (Player::Computer, 4),
                (Player::Computer, 5),
                (Player::Computer, 6),
                (Player::Human, 7),
                (Player::Human, 8),
            ],
        );
        assert!(check_draw(&board));
        assert!(!check_win(&board, Player::Human));
        assert!(!check_win(&board, Player::Computer));
        assert_eq!(evaluate(&board, Player::Human), Some(GameResult::Draw));
    }

    #[test]
    fn test_full_board_with_winner_is_a_win() {
        // X X X / O O X / X O O : full and the human holds the top row.
        let mut board = Board::new();
        fill(
            &mut board,
            &[
                (Player::Human, 0),
                (Player::Human, 1),
                (Player::Human, 2),
                (Player::Computer, 3),
                (Player::Computer, 4),
                (Player::Human, 5),
                (Player::Human, 6),
                (Player::Computer, 7),
                (Player::Computer, 8),
            ],
        );
        assert!(check_draw(&board));
        assert!(check_win(&board, Player::Human));
        assert_eq!(evaluate(&board, Player::Human), Some(GameResult::HumanWin));
    }
}
