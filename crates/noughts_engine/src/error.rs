//! Engine error types.

use crate::game::Phase;

/// Error that can occur when querying or mutating the game.
///
/// Every variant leaves the board and phase untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    /// Cell index outside `0..9`. A programming error: a fixed 9-cell
    /// front-end can never produce one.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(#[error(not(source))] usize),

    /// The cell already holds a move.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// Human input arrived while the game was not waiting for it.
    #[display("Not accepting input while {:?}", _0)]
    NotAcceptingInput(#[error(not(source))] Phase),

    /// A stored slot holds a move for a different cell.
    #[display("Slot {} holds a move for cell {}", slot, index)]
    MisplacedMove {
        /// The slot position.
        slot: usize,
        /// The cell index recorded in the move.
        index: usize,
    },

    /// The computer was asked to move on a full board.
    #[display("No available move: the board is full")]
    NoAvailableMove,
}

impl EngineError {
    /// Returns true for rejections the session absorbs as silent no-ops.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            EngineError::CellOccupied(_) | EngineError::NotAcceptingInput(_)
        )
    }
}
