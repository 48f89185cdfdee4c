//! Turn orchestration for a human-versus-computer game.
//!
//! The human always opens. Phases move
//! `AwaitingHumanMove -> ComputerThinking -> AwaitingHumanMove -> ...` until
//! a move ends the game, and an explicit reset returns to
//! `AwaitingHumanMove` from anywhere.

use crate::error::EngineError;
use crate::rules::evaluate;
use crate::strategy::{Choice, select_move_with};
use crate::types::{Board, Move, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Terminal result of a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameResult {
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// The board filled up with no line.
    Draw,
}

impl GameResult {
    /// The win result for `player`.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => GameResult::HumanWin,
            Player::Computer => GameResult::ComputerWin,
        }
    }

    /// Returns the winner, or `None` for a draw.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::HumanWin => Some(Player::Human),
            GameResult::ComputerWin => Some(Player::Computer),
            GameResult::Draw => None,
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to pick a cell.
    AwaitingHumanMove,
    /// The human has moved; the computer's reply is due.
    ComputerThinking,
    /// The game has ended.
    GameOver(GameResult),
}

impl Phase {
    /// Returns the result if the game is over.
    pub fn result(self) -> Option<GameResult> {
        match self {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }
}

/// A computer move together with the phase it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    /// The move placed on the board.
    pub mv: Move,
    /// The selection that produced it.
    pub choice: Choice,
    /// Phase after the move.
    pub phase: Phase,
}

/// Human-versus-computer game state machine.
///
/// The sole mutator of its board. Each reset bumps [`Game::generation`] so
/// work scheduled against an earlier game can be recognised and dropped.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    generation: u64,
}

impl Game {
    /// Creates a new game waiting for the human's first move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::AwaitingHumanMove,
            generation: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the reset counter of this game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the game accepts human input.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::AwaitingHumanMove
    }

    /// Whose turn it is, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self.phase {
            Phase::AwaitingHumanMove => Some(Player::Human),
            Phase::ComputerThinking => Some(Player::Computer),
            Phase::GameOver(_) => None,
        }
    }

    /// Places the human's mark at `index` and returns the new phase.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotAcceptingInput`] outside `AwaitingHumanMove`
    /// - [`EngineError::CellOccupied`] if the cell is taken
    /// - [`EngineError::InvalidIndex`] if `index` is not in `0..9`
    ///
    /// The game is unchanged in every error case.
    #[instrument(skip(self), fields(phase = ?self.phase, generation = self.generation))]
    pub fn process_human_move(&mut self, index: usize) -> Result<Phase, EngineError> {
        if !self.accepts_input() {
            return Err(EngineError::NotAcceptingInput(self.phase));
        }
        self.board.apply_move(Player::Human, index)?;
        self.phase = self.phase_after(Player::Human);
        debug!(index, phase = ?self.phase, "Human move applied");
        Ok(self.phase)
    }

    /// Plays the computer's reply using the process-wide random source.
    ///
    /// # Errors
    ///
    /// See [`Game::play_computer_move_with`].
    pub fn play_computer_move(&mut self) -> Result<ComputerTurn, EngineError> {
        self.play_computer_move_with(&mut rand::rng())
    }

    /// Plays the computer's reply, drawing any random choice from `rng`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotAcceptingInput`] outside `ComputerThinking`
    /// - [`EngineError::NoAvailableMove`] on a full board
    #[instrument(skip(self, rng), fields(phase = ?self.phase, generation = self.generation))]
    pub fn play_computer_move_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<ComputerTurn, EngineError> {
        if self.phase != Phase::ComputerThinking {
            return Err(EngineError::NotAcceptingInput(self.phase));
        }
        let choice = select_move_with(&self.board, rng)?;
        let mv = self.board.apply_move(Player::Computer, choice.index)?;
        self.phase = self.phase_after(Player::Computer);
        debug!(
            index = mv.index(),
            rule = %choice.rule,
            phase = ?self.phase,
            "Computer move applied"
        );
        Ok(ComputerTurn {
            mv,
            choice,
            phase: self.phase,
        })
    }

    /// Clears the board and waits for the human again, from any phase.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn reset(&mut self) {
        self.board = Board::reset();
        self.phase = Phase::AwaitingHumanMove;
        self.generation += 1;
        info!(generation = self.generation, "Game reset");
    }

    fn phase_after(&self, mover: Player) -> Phase {
        match evaluate(&self.board, mover) {
            Some(result) => {
                info!(%result, "Game over");
                Phase::GameOver(result)
            }
            None => match mover {
                Player::Human => Phase::ComputerThinking,
                Player::Computer => Phase::AwaitingHumanMove,
            },
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
