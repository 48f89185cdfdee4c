//! Computer move selection.
//!
//! The opponent is a fixed priority chain, not a search:
//!
//! 1. win now if one mark completes a line,
//! 2. otherwise block the human's completing cell,
//! 3. otherwise take the center,
//! 4. otherwise pick uniformly among the open cells.
//!
//! The first rule that yields a cell wins. Rules 1 and 2 scan
//! [`WIN_PATTERNS`] in order and take the first qualifying line. When
//! several lines qualify this tie-break is arbitrary but reproducible.

use crate::error::EngineError;
use crate::rules::WIN_PATTERNS;
use crate::types::{Board, Player};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Center cell index.
pub const CENTER: usize = 4;

/// The rule in the priority chain that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Rule {
    /// Completes a computer line.
    WinNow,
    /// Occupies the cell that would complete a human line.
    Block,
    /// Takes the center cell.
    Center,
    /// Uniform choice among the open cells.
    Random,
}

/// A selected cell together with the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Cell index to play.
    pub index: usize,
    /// Rule that fired.
    pub rule: Rule,
}

/// Finds the open cell that would complete a line for `player`.
///
/// For each pattern in enumeration order, removes the cells `player` already
/// holds; if exactly one cell remains and it is empty, that cell is returned.
#[instrument(skip(board))]
pub fn completing_cell(board: &Board, player: Player) -> Option<usize> {
    let held = board.cells_of(player);
    WIN_PATTERNS.iter().find_map(|pattern| {
        let mut missing = pattern.iter().copied().filter(|&index| !held[index]);
        match (missing.next(), missing.next()) {
            (Some(index), None) if board.slots()[index].is_none() => Some(index),
            _ => None,
        }
    })
}

/// Selects the computer's move using the process-wide random source.
///
/// # Errors
///
/// Returns [`EngineError::NoAvailableMove`] on a full board.
pub fn select_move(board: &Board) -> Result<Choice, EngineError> {
    select_move_with(board, &mut rand::rng())
}

/// Selects the computer's move, drawing the random fallback from `rng`.
///
/// # Errors
///
/// Returns [`EngineError::NoAvailableMove`] on a full board.
#[instrument(skip(board, rng), fields(occupied = board.occupied_count()))]
pub fn select_move_with<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Choice, EngineError> {
    let available = board.available_cells();
    if available.is_empty() {
        return Err(EngineError::NoAvailableMove);
    }

    let choice = if let Some(index) = completing_cell(board, Player::Computer) {
        Choice { index, rule: Rule::WinNow }
    } else if let Some(index) = completing_cell(board, Player::Human) {
        Choice { index, rule: Rule::Block }
    } else if board.slots()[CENTER].is_none() {
        Choice { index: CENTER, rule: Rule::Center }
    } else {
        let index = *available
            .choose(rng)
            .ok_or(EngineError::NoAvailableMove)?;
        Choice { index, rule: Rule::Random }
    };

    debug!(index = choice.index, rule = %choice.rule, "Computer chose cell");
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(human: &[usize], computer: &[usize]) -> Board {
        let mut board = Board::new();
        for &index in human {
            board.apply_move(Player::Human, index).unwrap();
        }
        for &index in computer {
            board.apply_move(Player::Computer, index).unwrap();
        }
        board
    }

    #[test]
    fn test_completing_cell_none_on_empty_board() {
        let board = Board::new();
        assert_eq!(completing_cell(&board, Player::Computer), None);
    }

    #[test]
    fn test_completing_cell_ignores_blocked_line() {
        // Computer holds 0 and 1 but the human already sits on 2.
        let board = board_with(&[2], &[0, 1]);
        assert_eq!(completing_cell(&board, Player::Computer), None);
    }

    #[test]
    fn test_completing_cell_finds_gap_in_middle() {
        let board = board_with(&[0, 8], &[]);
        assert_eq!(completing_cell(&board, Player::Human), Some(4));
    }

    #[test]
    fn test_completing_cell_takes_first_pattern() {
        // Human threatens both [0,1,2] via 2 and [0,3,6] via 6.
        let board = board_with(&[0, 1, 3], &[]);
        assert_eq!(completing_cell(&board, Player::Human), Some(2));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_with(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        assert_eq!(select_move(&board), Err(EngineError::NoAvailableMove));
    }

    #[test]
    fn test_win_reports_rule() {
        let board = board_with(&[3, 5], &[0, 1]);
        let choice = select_move(&board).unwrap();
        assert_eq!(choice, Choice { index: 2, rule: Rule::WinNow });
    }

    #[test]
    fn test_random_fallback_picks_open_cell() {
        // Center taken, no threats on either side.
        let board = board_with(&[0], &[4]);
        for _ in 0..50 {
            let choice = select_move(&board).unwrap();
            assert_eq!(choice.rule, Rule::Random);
            assert!(!board.is_occupied(choice.index).unwrap());
        }
    }
}
