//! Core domain types: players, moves, and the board.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// The human player (always opens, shown as `X`).
    Human,
    /// The rule-based computer opponent (shown as `O`).
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// A move: a player's mark at a cell index.
///
/// Moves are immutable once placed; a board holds at most one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    player: Player,
    index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }

    /// Returns the player who made this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the cell index of this move.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.index)
    }
}

/// 3x3 board of optional move slots in row-major order.
///
/// Invariant: slot `i`, if present, holds a move with `index() == i`.
/// Only [`Board::apply_move`] fills a slot, and nothing clears one except
/// replacing the whole board. Deserialization checks the invariant too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    slots: [Option<Move>; CELL_COUNT],
}

/// Unchecked wire shape of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    slots: [Option<Move>; CELL_COUNT],
}

impl TryFrom<RawBoard> for Board {
    type Error = EngineError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        for (slot, mv) in raw.slots.iter().enumerate() {
            let Some(mv) = mv else { continue };
            if mv.index() != slot {
                return Err(EngineError::MisplacedMove {
                    slot,
                    index: mv.index(),
                });
            }
        }
        Ok(Self { slots: raw.slots })
    }
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty board, discarding all moves.
    pub fn reset() -> Self {
        Self::new()
    }

    /// Returns the move in the given slot.
    pub fn get(&self, index: usize) -> Result<Option<Move>, EngineError> {
        self.slots
            .get(index)
            .copied()
            .ok_or(EngineError::InvalidIndex(index))
    }

    /// Checks whether some move occupies the given cell.
    pub fn is_occupied(&self, index: usize) -> Result<bool, EngineError> {
        Ok(self.get(index)?.is_some())
    }

    /// Places `player`'s mark at `index`.
    ///
    /// On error the board is left unchanged.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, player: Player, index: usize) -> Result<Move, EngineError> {
        if self.is_occupied(index)? {
            return Err(EngineError::CellOccupied(index));
        }
        let mv = Move::new(player, index);
        self.slots[index] = Some(mv);
        Ok(mv)
    }

    /// Pure variant of [`Board::apply_move`]: returns a new board with the move applied.
    pub fn with_move(&self, player: Player, index: usize) -> Result<Self, EngineError> {
        let mut next = self.clone();
        next.apply_move(player, index)?;
        Ok(next)
    }

    /// Returns all slots.
    pub fn slots(&self) -> &[Option<Move>; CELL_COUNT] {
        &self.slots
    }

    /// Iterates over the placed moves in cell order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Returns the cells occupied by `player`, as a membership table.
    pub fn cells_of(&self, player: Player) -> [bool; CELL_COUNT] {
        let mut cells = [false; CELL_COUNT];
        for mv in self.moves().filter(|mv| mv.player() == player) {
            cells[mv.index()] = true;
        }
        cells
    }

    /// Returns the unoccupied cell indices in ascending order.
    pub fn available_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT)
            .filter(|&index| self.slots[index].is_none())
            .collect()
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when every slot holds a move.
    pub fn is_full(&self) -> bool {
        self.occupied_count() == CELL_COUNT
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so they can be typed back in.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.slots[index] {
                    Some(mv) => mv.player().mark(),
                    None => char::from_digit((index + 1) as u32, 10).unwrap_or('?'),
                };
                result.push(' ');
                result.push(symbol);
                result.push(' ');
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n---+---+---\n");
            }
        }
        result
    }
}
